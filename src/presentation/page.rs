//! The page surface the client binds to: a list container, a detail
//! container, the new-post and edit forms, and a way to alert the user.

use std::fmt;
use std::str::FromStr;

use postboard_api_types::Post;

use crate::domain::posts::{EditPostForm, NewPostForm};

use super::views::{self, DetailPane, ListRow, PageTemplate, TemplateRenderError};

pub trait Page: Send {
    fn new_post_form(&self) -> NewPostForm;

    fn reset_new_post_form(&mut self);

    fn edit_form(&self) -> EditPostForm;

    fn fill_edit_form(&mut self, title: &str, content: &str);

    fn set_edit_form_visible(&mut self, visible: bool);

    /// Replace every row of the list container. `filter` is the author query
    /// the rows were narrowed by, `None` for the full list.
    fn render_list(&mut self, rows: Vec<ListRow>, filter: Option<&str>);

    fn render_detail(&mut self, pane: DetailPane);

    /// The post whose detail is currently on screen, if any.
    fn displayed_post(&self) -> Option<Post>;

    fn alert(&mut self, message: &str);
}

/// Named input fields of the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
    Author,
    Image,
    EditTitle,
    EditContent,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "author" => Ok(Self::Author),
            "image" => Ok(Self::Image),
            "edit-title" => Ok(Self::EditTitle),
            "edit-content" => Ok(Self::EditContent),
            other => Err(format!("unknown form field `{other}`")),
        }
    }
}

/// Page held entirely in memory; renders to HTML on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    new_post: NewPostForm,
    edit: EditPostForm,
    edit_visible: bool,
    search: String,
    rows: Vec<ListRow>,
    list_filter: Option<String>,
    detail: DetailPane,
    alerts: Vec<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.new_post.title = value,
            FormField::Content => self.new_post.content = value,
            FormField::Author => self.new_post.author = value,
            FormField::Image => self.new_post.image = value,
            FormField::EditTitle => self.edit.title = value,
            FormField::EditContent => self.edit.content = value,
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    pub fn is_edit_visible(&self) -> bool {
        self.edit_visible
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Remove and return alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn render_html(&self) -> Result<String, TemplateRenderError> {
        let template = PageTemplate {
            title: "Postboard",
            search: &self.search,
            list_html: views::render_list(&self.rows)?,
            detail_html: views::render_detail(&self.detail)?,
            edit_visible: self.edit_visible,
            edit: &self.edit,
            new_post: &self.new_post,
        };
        views::render_template(&template)
    }
}

impl Page for MemoryPage {
    fn new_post_form(&self) -> NewPostForm {
        self.new_post.clone()
    }

    fn reset_new_post_form(&mut self) {
        self.new_post = NewPostForm::default();
    }

    fn edit_form(&self) -> EditPostForm {
        self.edit.clone()
    }

    fn fill_edit_form(&mut self, title: &str, content: &str) {
        self.edit = EditPostForm {
            title: title.to_string(),
            content: content.to_string(),
        };
    }

    fn set_edit_form_visible(&mut self, visible: bool) {
        self.edit_visible = visible;
    }

    fn render_list(&mut self, rows: Vec<ListRow>, filter: Option<&str>) {
        self.rows = rows;
        self.list_filter = filter.map(str::to_string);
    }

    fn render_detail(&mut self, pane: DetailPane) {
        self.detail = pane;
    }

    fn displayed_post(&self) -> Option<Post> {
        self.detail.post().cloned()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl fmt::Display for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.list_filter {
            Some(query) => writeln!(f, "Posts ({}, author ~ {query:?}):", self.rows.len())?,
            None => writeln!(f, "Posts ({}):", self.rows.len())?,
        }
        for row in &self.rows {
            writeln!(f, "  [{}] {}", row.id, row.label)?;
        }

        match &self.detail {
            DetailPane::Empty => writeln!(f, "Detail: (none)")?,
            DetailPane::Deleted => writeln!(f, "Detail: {}", views::DELETED_PLACEHOLDER)?,
            DetailPane::Post(post) => {
                writeln!(f, "Detail: [{}] {}", post.id, post.title)?;
                writeln!(f, "  Author: {}", post.author)?;
                if let Some(url) = post.image_url() {
                    writeln!(f, "  Image: {url}")?;
                }
                writeln!(f, "  {}", post.content)?;
            }
        }

        if self.edit_visible {
            writeln!(
                f,
                "Edit form: title={:?} content={:?}",
                self.edit.title, self.edit.content
            )?;
        }
        Ok(())
    }
}
