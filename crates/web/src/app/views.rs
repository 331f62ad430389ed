//! Page templates, compiled once at startup.

use axum::response::Html;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

use super::errors::{AppError, ErrorPage};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    ("detail", include_str!("../../templates/detail.hbs")),
    ("attending", include_str!("../../templates/attending.hbs")),
    (
        "attending_success",
        include_str!("../../templates/attending_success.hbs"),
    ),
    ("register", include_str!("../../templates/register.hbs")),
    ("welcome", include_str!("../../templates/welcome.hbs")),
    ("404", include_str!("../../templates/404.hbs")),
    ("500", include_str!("../../templates/500.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, page: &str, data: &T) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(page, data)?))
    }

    pub fn error_page(&self, page: ErrorPage) -> Result<Html<String>, RenderError> {
        self.registry
            .render(page.template(), &json!({ "title": page.title() }))
            .map(Html)
    }
}
