//! The page and index templates. Both are Go-style [`gtmpl`] templates,
//! compiled once per build by [`Templates::new`]. Values are interpolated
//! verbatim with no HTML escaping; note titles and dates come from the site
//! owner's own file names.

use crate::config::SiteConfig;
use crate::document::{Document, IndexEntry};
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use thiserror::Error;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <link rel="stylesheet" href="{{.site.stylesheet}}" />
    <link rel="stylesheet" href="{{.site.highlight_stylesheet}}">
    <title>{{.page.title}}</title>
  </head>
  <body>
    <div class="container">
      <div class="nav">
        <a href="./" class="back">&lt;-- Back to Index</a>
      </div>

      <div class="date">{{.page.date}}</div>

      <div class="content">{{.page.content}}</div>
    </div>
    <footer>
      {{if .page.show_badge}}<div class="rc-scout"></div>{{end}}
      <div>&copy; <a href="{{.site.author_url}}">{{.site.author}}</a> {{.site.copyright_since}}-</div>
    </footer>

    {{if .page.show_badge}}<script async defer src="{{.site.badge_loader}}"></script>{{end}}
    <script src="{{.site.highlight_script}}"></script>
    <script>
      hljs.highlightAll();
    </script>
  </body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <link rel="stylesheet" href="{{.site.stylesheet}}" />
    <title>{{.site.title}}</title>
  </head>
  <body>
    <div class="container">
      <h1>{{.site.title}}</h1>
      <p>
        {{.site.tagline}}
      </p>

      <div class="posts">
      {{range .entries}}<a href="{{.link}}" class="post">
          <span class="date">{{.date}}</span> {{.title}}
        </a>{{end}}
      </div>
    </div>
    <footer>
      <div class="rc-scout"></div>
      <div>&copy; <a href="{{.site.author_url}}">{{.site.author}}</a> {{.site.copyright_since}}-</div>
    </footer>

    <script
      async
      defer
      src="{{.site.badge_loader}}"
    ></script>
  </body>
</html>"#;

/// The compiled page and index templates together with the site settings
/// they share.
pub struct Templates {
    page: Template,
    index: Template,
    site: Value,
}

impl Templates {
    /// Compiles both templates.
    pub fn new(site: &SiteConfig) -> Result<Templates> {
        Ok(Templates {
            page: parse("page", PAGE_TEMPLATE)?,
            index: parse("index", INDEX_TEMPLATE)?,
            site: Value::from(site),
        })
    }

    /// Renders the full HTML page for a published note.
    pub fn page(&self, document: &Document) -> Result<String> {
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert("page".to_owned(), Value::from(document));
        self.render("page", &self.page, fields)
    }

    /// Renders the index page. `entries` are listed in the order given.
    pub fn index(&self, entries: &[IndexEntry]) -> Result<String> {
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert(
            "entries".to_owned(),
            Value::Array(entries.iter().map(Value::from).collect()),
        );
        self.render("index", &self.index, fields)
    }

    fn render(
        &self,
        name: &'static str,
        template: &Template,
        mut fields: HashMap<String, Value>,
    ) -> Result<String> {
        fields.insert("site".to_owned(), self.site.clone());
        let context = Context::from(Value::Object(fields)).map_err(|e| Error::Render {
            name,
            message: e.to_string(),
        })?;

        let mut out: Vec<u8> = Vec::new();
        template
            .execute(&mut out, &context)
            .map_err(|e| Error::Render {
                name,
                message: e.to_string(),
            })?;
        String::from_utf8(out).map_err(|e| Error::Render {
            name,
            message: e.to_string(),
        })
    }
}

fn parse(name: &'static str, text: &str) -> Result<Template> {
    let mut template = Template::default();
    template.parse(text).map_err(|e| Error::Parse {
        name,
        message: e.to_string(),
    })?;
    Ok(template)
}

/// The result of a fallible templating operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error compiling or executing a template.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a template fails to compile.
    #[error("parsing {name} template: {message}")]
    Parse { name: &'static str, message: String },

    /// Returned when a template fails to execute.
    #[error("rendering {name} template: {message}")]
    Render { name: &'static str, message: String },
}
