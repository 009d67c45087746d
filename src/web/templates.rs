//! Template engine
//!
//! Templates are compiled into the binary so a deployment is a single file.
//! Rendering goes through Tera; every page extends `base.html`, which guards
//! all of its variables so error pages can render without database context.

use anyhow::{Context as _, Result};
use once_cell::sync::Lazy;
use tera::{Context, Tera};

static TERA: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/base.html")),
        ("index.html", include_str!("../../templates/index.html")),
        ("about.html", include_str!("../../templates/about.html")),
        ("category.html", include_str!("../../templates/category.html")),
        ("post.html", include_str!("../../templates/post.html")),
        ("auth/login.html", include_str!("../../templates/auth/login.html")),
        (
            "admin/manage_posts.html",
            include_str!("../../templates/admin/manage_posts.html"),
        ),
        (
            "admin/edit_post.html",
            include_str!("../../templates/admin/edit_post.html"),
        ),
        (
            "admin/manage_categories.html",
            include_str!("../../templates/admin/manage_categories.html"),
        ),
        (
            "admin/manage_comments.html",
            include_str!("../../templates/admin/manage_comments.html"),
        ),
        (
            "admin/settings.html",
            include_str!("../../templates/admin/settings.html"),
        ),
        ("errors/400.html", include_str!("../../templates/errors/400.html")),
        ("errors/404.html", include_str!("../../templates/errors/404.html")),
        ("errors/500.html", include_str!("../../templates/errors/500.html")),
    ])
    .expect("Embedded templates failed to parse");
    tera
});

/// Render a named template with the given context.
pub fn render(name: &str, context: &Context) -> Result<String> {
    TERA.render(name, context)
        .with_context(|| format!("Failed to render template: {}", name))
}
