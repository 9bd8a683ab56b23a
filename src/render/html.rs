//! Built-in HTML renderer.
//!
//! Produces a complete document: header with a version switcher, sidebar
//! menu with the current entry highlighted, and the main content area.
//! Page `source` is inserted as-is (it is pre-rendered HTML); every other
//! value is escaped.

use std::fmt::Write;

use serde_json::Value;

use crate::render::{check_required, Globals, RenderError, Renderer, Template, ViewModel};

/// Renderer that builds documents in code.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(
        &self,
        template: Template,
        globals: &Globals,
        vars: &ViewModel,
    ) -> Result<String, RenderError> {
        check_required(template, vars)?;

        let title = vars.get_str("title").unwrap_or_default();
        let version = vars.get_str("version").unwrap_or_default();
        let current = vars.get_str("current").unwrap_or_default();

        let mut main = String::with_capacity(4096);
        match template {
            Template::Index => {
                if let Some(Value::Array(submenu)) = vars.get("submenu") {
                    if !submenu.is_empty() {
                        main.push_str("<nav class=\"submenu\">");
                        render_menu(&mut main, submenu, version, current);
                        main.push_str("</nav>");
                    }
                }
                main.push_str("<article class=\"page\">");
                main.push_str(vars.get_str("source").unwrap_or_default());
                main.push_str("</article>");
            }
            Template::ClassReference => {
                let _ = write!(main, "<h1>{}</h1>", escape(title));
                main.push_str("<section class=\"class-reference\">");
                render_value(&mut main, vars.get("classes").unwrap_or(&Value::Null));
                main.push_str("</section>");
            }
            Template::Cheatsheet => {
                let _ = write!(main, "<h1>{}</h1>", escape(title));
                main.push_str("<section class=\"cheatsheet\">");
                render_value(&mut main, vars.get("cheatsheet").unwrap_or(&Value::Null));
                main.push_str("</section>");
            }
        }

        let menu: &[Value] = match vars.get("menu") {
            Some(Value::Array(menu)) => menu.as_slice(),
            _ => &[],
        };
        let mut sidebar = String::with_capacity(2048);
        render_menu(&mut sidebar, menu, version, current);

        let tail = switch_tail(template, current, menu);
        Ok(document(globals, title, version, &tail, &sidebar, &main))
    }
}

/// Path below `/{version}/` that the version switcher links to.
///
/// Keeps the reader on the same page across versions. Pages without a slug
/// of their own (the 404 page) link to the first entry of the menu.
fn switch_tail(template: Template, current: &str, menu: &[Value]) -> String {
    match template {
        Template::ClassReference => "class-reference".to_string(),
        Template::Cheatsheet => "cheatsheet".to_string(),
        Template::Index if !current.is_empty() => current.to_string(),
        Template::Index => first_slug(menu).unwrap_or_default().to_string(),
    }
}

fn first_slug(entries: &[Value]) -> Option<&str> {
    entries.iter().find_map(|entry| {
        entry.get("slug").and_then(Value::as_str).or_else(|| {
            entry
                .get("children")
                .and_then(Value::as_array)
                .and_then(|children| first_slug(children))
        })
    })
}

fn document(
    globals: &Globals,
    title: &str,
    version: &str,
    tail: &str,
    sidebar: &str,
    main: &str,
) -> String {
    let site = escape(&globals.config.name);
    let mut out = String::with_capacity(main.len() + sidebar.len() + 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{} | {}</title>", escape(title), site);
    out.push_str("</head>\n<body>\n<header>\n");
    let _ = writeln!(
        out,
        "<a class=\"brand\" href=\"{}\">{}</a>",
        escape(&globals.config.start_page),
        site
    );

    out.push_str("<nav class=\"versions\">");
    for v in &globals.versions {
        let class = if v.key == version { " class=\"active\"" } else { "" };
        let _ = write!(
            out,
            "<a href=\"/{}/{}\"{}>{}</a>",
            escape(&v.key),
            escape(tail),
            class,
            escape(&v.label)
        );
    }
    out.push_str("</nav>\n</header>\n");

    out.push_str("<div class=\"layout\">\n<aside class=\"sidebar\">");
    out.push_str(sidebar);
    out.push_str("</aside>\n<main>");
    out.push_str(main);
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    out
}

/// Render menu entries (as serialized `MenuEntry` values) into nested lists.
fn render_menu(out: &mut String, entries: &[Value], version: &str, current: &str) {
    out.push_str("<ul>");
    for entry in entries {
        let title = entry.get("title").and_then(Value::as_str).unwrap_or_default();
        let slug = entry.get("slug").and_then(Value::as_str);

        if slug.is_some_and(|s| s == current) {
            out.push_str("<li class=\"current\">");
        } else {
            out.push_str("<li>");
        }

        match slug {
            Some(slug) => {
                let _ = write!(
                    out,
                    "<a href=\"/{}/{}\">{}</a>",
                    escape(version),
                    escape(slug),
                    escape(title)
                );
            }
            None => {
                let _ = write!(out, "<span>{}</span>", escape(title));
            }
        }

        if let Some(Value::Array(children)) = entry.get("children") {
            if !children.is_empty() {
                render_menu(out, children, version, current);
            }
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

/// Render arbitrary reference data as nested definition lists.
fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&escape(s)),
        Value::Array(items) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                render_value(out, item);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Value::Object(map) => {
            out.push_str("<dl>");
            for (key, item) in map {
                let _ = write!(out, "<dt>{}</dt><dd>", escape(key));
                render_value(out, item);
                out.push_str("</dd>");
            }
            out.push_str("</dl>");
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
