//! # Stamp - Strict Version File Rendering
//!
//! Turns a declarative version file into output text. The body is a
//! [minijinja](https://docs.rs/minijinja) template rendered in strict mode;
//! stamp adds the declaration header on top and maps errors to file lines.
//!
//! ## The Problem
//!
//! Build tooling wants generated headers (`version.h`, `build.hpp`, ...) that carry
//! version numbers and build times. Lenient template engines silently render a
//! typo as an empty string, which ends up compiled into a release.
//!
//! ## The Solution
//!
//! Stamp keeps the file format small and the failure mode loud:
//! - **Declarations** in a header define variables (`major = 1`)
//! - **Placeholders** in the body reference them (`{{ major }}`)
//! - **Unknown names are errors**, reported with the variable and its line
//!
//! ## File Syntax
//!
//! ```text
//! # comment
//! major = 1
//! minor = 2
//! version = {{ major }}.{{ minor }}
//! ---
//! #define VERSION "{{ version }}"
//! ```
//!
//! - The first line that is exactly `---` separates the header from the body.
//!   A file without a separator is all body.
//! - Header lines are blank, `#` comments, or `name = value`. Values are trimmed
//!   and may be wrapped in double quotes to keep surrounding spaces. Values are
//!   templates themselves and may refer to earlier declarations or context
//!   variables.
//! - The body is Jinja syntax: `{{ name }}` is replaced, filters and
//!   expressions work (`{{ minor | int + 1 }}`), and `{% raw %}{{ x }}{% endraw %}`
//!   produces a literal `{{ x }}`. Everything else is copied byte for byte,
//!   including the final newline.
//!
//! ## Variable Precedence
//!
//! A [`Context`] holds two layers supplied by the caller. Lookups consult, in order:
//!
//! 1. **Defines**: explicit values from the user; a declaration with the same
//!    name is skipped entirely
//! 2. **Declarations** from the document header (later ones replace earlier ones)
//! 3. **Built-ins** supplied by the tool
//!
//! ## Quick Example
//!
//! ```rust
//! use stamp::{Context, Document};
//!
//! let ctx = Context::new()
//!     .with_builtin("time", "1329040800")
//!     .with_define("build", "release");
//!
//! let doc = Document::parse("minor = 4\n---\n{{ minor }} {{ build }} {{ time }}\n").unwrap();
//! let rendered = doc.render(&ctx).unwrap();
//! assert_eq!(rendered.text, "4 release 1329040800\n");
//! ```

use minijinja::{Environment, Error as JinjaError, ErrorKind, UndefinedBehavior};
use std::collections::BTreeMap;
use thiserror::Error;

/// Line that separates the declaration header from the body.
pub const SEPARATOR: &str = "---";

const BODY: &str = "body";

/// Errors raised while parsing or rendering a document.
///
/// Lines are 1-based and refer to the whole input file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("undefined variable '{name}' at line {line}")]
    Undefined { name: String, line: usize },

    #[error("malformed input at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;

/// Returns true if `name` can be used as a variable name.
///
/// Names are identifiers: an ASCII letter or `_`, then ASCII letters, digits
/// or `_`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Variables available to a rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    builtins: BTreeMap<String, String>,
    defines: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a built-in variable, returning the context for chaining.
    pub fn with_builtin(mut self, name: &str, value: &str) -> Self {
        self.set_builtin(name, value);
        self
    }

    /// Adds a define, returning the context for chaining.
    pub fn with_define(mut self, name: &str, value: &str) -> Self {
        self.define(name, value);
        self
    }

    /// Sets a built-in variable, replacing any previous built-in with that name.
    pub fn set_builtin(&mut self, name: &str, value: &str) {
        self.builtins.insert(name.to_string(), value.to_string());
    }

    /// Sets a define. Defines take precedence over declarations and built-ins;
    /// a later define with the same name replaces the earlier one.
    pub fn define(&mut self, name: &str, value: &str) {
        self.defines.insert(name.to_string(), value.to_string());
    }

    /// Returns true if `name` was set with [`Context::define`].
    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    /// Looks a name up in the defines, then the built-ins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defines
            .get(name)
            .or_else(|| self.builtins.get(name))
            .map(String::as_str)
    }

    /// The variables a template sees with `locals` declared so far.
    fn scope(&self, locals: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut vars = self.builtins.clone();
        vars.extend(locals.iter().map(|(k, v)| (k.clone(), v.clone())));
        vars.extend(self.defines.iter().map(|(k, v)| (k.clone(), v.clone())));
        vars
    }
}

/// A `name = value` line from the document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Template source of the value, quotes removed
    pub value: String,
    pub line: usize,
}

impl Declaration {
    fn template_name(&self) -> String {
        format!("line {}", self.line)
    }
}

/// A parsed version file.
#[derive(Debug, Clone)]
pub struct Document {
    declarations: Vec<Declaration>,
    body_line: usize,
    env: Environment<'static>,
}

/// Output of [`Document::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered body.
    pub text: String,
    /// Declarations that were evaluated, in file order, with their values.
    pub declared: Vec<(String, String)>,
    /// Variables referenced by the body, by name, with their values.
    pub used: Vec<(String, String)>,
}

impl Document {
    /// Parses a whole version file, including the template syntax of the body
    /// and of every declaration value.
    pub fn parse(source: &str) -> Result<Self> {
        let (header, body, body_line) = split(source);
        let declarations = match header {
            Some(header) => parse_header(header)?,
            None => Vec::new(),
        };

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        for decl in &declarations {
            env.add_template_owned(decl.template_name(), decl.value.clone())
                .map_err(|e| malformed(&e, decl.line))?;
        }
        env.add_template_owned(BODY, body.to_string())
            .map_err(|e| malformed(&e, body_line))?;

        Ok(Self {
            declarations,
            body_line,
            env,
        })
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Evaluates the declarations and renders the body.
    ///
    /// Declarations whose name is defined in `ctx` are skipped, so a define can
    /// replace a declaration that would otherwise fail to resolve.
    pub fn render(&self, ctx: &Context) -> Result<Rendered> {
        let mut locals = BTreeMap::new();
        let mut declared = Vec::new();

        for decl in &self.declarations {
            if ctx.is_defined(&decl.name) {
                continue;
            }
            let vars = ctx.scope(&locals);
            let value = self.expand(&decl.template_name(), decl.line, &vars)?;
            declared.push((decl.name.clone(), value.clone()));
            locals.insert(decl.name.clone(), value);
        }

        let vars = ctx.scope(&locals);
        let text = self.expand(BODY, self.body_line, &vars)?;
        let used = self
            .referenced(BODY)
            .into_iter()
            .filter_map(|name| vars.get(&name).map(|value| (name, value.clone())))
            .collect();

        Ok(Rendered {
            text,
            declared,
            used,
        })
    }

    /// Top-level names a template reads, sorted.
    fn referenced(&self, template: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .get_template(template)
            .map(|t| t.undeclared_variables(false).into_iter().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn expand(
        &self,
        template: &str,
        first_line: usize,
        vars: &BTreeMap<String, String>,
    ) -> Result<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| malformed(&e, first_line))?;

        tmpl.render(vars).map_err(|e| {
            if e.kind() != ErrorKind::UndefinedError {
                return malformed(&e, first_line);
            }
            let line = file_line(&e, first_line);
            let source = tmpl.source();
            let text = e
                .line()
                .and_then(|n| source.lines().nth(n.saturating_sub(1)))
                .unwrap_or(source);
            let missing: Vec<String> = self
                .referenced(template)
                .into_iter()
                .filter(|name| !vars.contains_key(name))
                .collect();
            match missing
                .iter()
                .find(|name| mentions(text, name))
                .or(missing.first())
            {
                Some(name) => TemplateError::Undefined {
                    name: name.clone(),
                    line,
                },
                None => malformed(&e, first_line),
            }
        })
    }
}

/// Splits at the first separator line: header, body, and the file line the
/// body starts on.
fn split(source: &str) -> (Option<&str>, &str, usize) {
    let mut offset = 0;
    for (idx, line) in source.split_inclusive('\n').enumerate() {
        if line.trim_end() == SEPARATOR {
            return (
                Some(&source[..offset]),
                &source[offset + line.len()..],
                idx + 2,
            );
        }
        offset += line.len();
    }
    (None, source, 1)
}

fn parse_header(header: &str) -> Result<Vec<Declaration>> {
    let mut declarations = Vec::new();

    for (idx, line) in header.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (lhs, rhs) = trimmed
            .split_once('=')
            .ok_or_else(|| TemplateError::Malformed {
                line: line_no,
                reason: "expected 'name = value'".to_string(),
            })?;

        let name = lhs.trim();
        if !is_valid_name(name) {
            return Err(TemplateError::Malformed {
                line: line_no,
                reason: format!("invalid variable name '{}'", name),
            });
        }

        declarations.push(Declaration {
            name: name.to_string(),
            value: strip_quotes(rhs.trim()).to_string(),
            line: line_no,
        });
    }

    Ok(declarations)
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn file_line(err: &JinjaError, first_line: usize) -> usize {
    first_line + err.line().unwrap_or(1).saturating_sub(1)
}

fn malformed(err: &JinjaError, first_line: usize) -> TemplateError {
    TemplateError::Malformed {
        line: file_line(err, first_line),
        reason: err
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
    }
}

/// True if `text` contains `name` as a whole identifier.
fn mentions(text: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    text.match_indices(name).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + name.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new()
            .with_builtin("time", "1329040800")
            .with_builtin("date", "2012-02-12")
    }

    fn render(source: &str, ctx: &Context) -> Result<Rendered> {
        Document::parse(source)?.render(ctx)
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("major"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("build_cfg2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2fast"));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name("build-cfg"));
        assert!(!is_valid_name("build.cfg"));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let source = "no placeholders here\r\nsecond line without newline";
        let rendered = render(source, &ctx()).unwrap();
        assert_eq!(rendered.text, source);
        assert!(rendered.used.is_empty());
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let rendered = render("{{ time }}\n", &ctx()).unwrap();
        assert_eq!(rendered.text, "1329040800\n");
    }

    #[test]
    fn test_body_only_document() {
        let rendered = render("built {{ time }} on {{date}}\n", &ctx()).unwrap();
        assert_eq!(rendered.text, "built 1329040800 on 2012-02-12\n");
    }

    #[test]
    fn test_declarations_feed_body() {
        let source = "major = 1\nminor = 2\nversion = {{ major }}.{{ minor }}\n---\nv{{ version }}\n";
        let rendered = render(source, &ctx()).unwrap();
        assert_eq!(rendered.text, "v1.2\n");
        assert_eq!(
            rendered.declared,
            vec![
                ("major".to_string(), "1".to_string()),
                ("minor".to_string(), "2".to_string()),
                ("version".to_string(), "1.2".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_is_not_emitted() {
        let rendered = render("# comment {{ nope }}\n\nname = x\n---\nbody\n", &ctx()).unwrap();
        assert_eq!(rendered.text, "body\n");
    }

    #[test]
    fn test_only_first_separator_splits() {
        let rendered = render("a = 1\n---\n{{ a }}\n---\n", &ctx()).unwrap();
        assert_eq!(rendered.text, "1\n---\n");
    }

    #[test]
    fn test_separator_with_crlf() {
        let rendered = render("a = 1\r\n---\r\n{{ a }}\r\n", &ctx()).unwrap();
        assert_eq!(rendered.text, "1\r\n");
    }

    #[test]
    fn test_quoted_value_keeps_spaces() {
        let rendered = render("title = \"  spaced  \"\n---\n[{{ title }}]", &ctx()).unwrap();
        assert_eq!(rendered.text, "[  spaced  ]");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let rendered = render("flags = -O2 -DNDEBUG=1\n---\n{{ flags }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "-O2 -DNDEBUG=1");
    }

    #[test]
    fn test_redeclaration_last_wins() {
        let rendered = render("x = 1\nx = 2\n---\n{{ x }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "2");
    }

    #[test]
    fn test_declaration_overrides_builtin() {
        let rendered = render("date = today\n---\n{{ date }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "today");
    }

    #[test]
    fn test_define_overrides_declaration_and_builtin() {
        let ctx = ctx().with_define("time", "42").with_define("major", "9");
        let rendered = render("major = 1\n---\n{{ major }} {{ time }}", &ctx).unwrap();
        assert_eq!(rendered.text, "9 42");
    }

    #[test]
    fn test_define_skips_unresolvable_declaration() {
        let ctx = ctx().with_define("version", "3.0");
        let rendered = render("version = {{ missing }}\n---\n{{ version }}", &ctx).unwrap();
        assert_eq!(rendered.text, "3.0");
        assert!(rendered.declared.is_empty());
    }

    #[test]
    fn test_later_define_replaces_earlier() {
        let mut ctx = Context::new();
        ctx.define("x", "1");
        ctx.define("x", "2");
        assert_eq!(render("{{ x }}", &ctx).unwrap().text, "2");
    }

    #[test]
    fn test_undefined_variable_reports_name_and_line() {
        let err = render("a = 1\n---\nfirst\nsecond {{ nope }}\n", &ctx()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Undefined {
                name: "nope".to_string(),
                line: 4,
            }
        );
        assert_eq!(err.to_string(), "undefined variable 'nope' at line 4");
    }

    #[test]
    fn test_undefined_picks_the_name_on_the_failing_line() {
        let err = render("{{ time }}\n{{ zeta }}\n{{ alpha }}\n", &ctx()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Undefined {
                name: "zeta".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_undefined_in_declaration() {
        let err = render("# header\nv = {{ major }}\n---\n", &ctx()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Undefined {
                name: "major".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_declaration_cannot_see_later_declaration() {
        let err = render("a = {{ b }}\nb = 1\n---\n", &ctx()).unwrap_err();
        assert!(matches!(err, TemplateError::Undefined { ref name, line: 1 } if name == "b"));
    }

    #[test]
    fn test_unclosed_placeholder_is_malformed() {
        let err = Document::parse("ok\nbroken {{ name\n").unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_body_syntax_error_line_counts_the_header() {
        let err = Document::parse("a = 1\nb = 2\n---\nfine\n{% if %}\n").unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { line: 5, .. }));
    }

    #[test]
    fn test_declaration_syntax_error() {
        let err = Document::parse("\nv = {{ }}\n---\n").unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_malformed_header_line() {
        let err = render("major 1\n---\n", &ctx()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Malformed {
                line: 1,
                reason: "expected 'name = value'".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_declared_name() {
        let err = render("\n\n  9lives = 1\n---\n", &ctx()).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { line: 3, .. }));
        assert!(err.to_string().contains("invalid variable name '9lives'"));
    }

    #[test]
    fn test_raw_block_emits_literal_braces() {
        let rendered = render("{% raw %}{{ time }}{% endraw %} is {{ time }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "{{ time }} is 1329040800");
    }

    #[test]
    fn test_whitespace_inside_braces_is_optional() {
        let rendered = render("{{time}}|{{   time   }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "1329040800|1329040800");
    }

    #[test]
    fn test_expressions_over_variables() {
        let rendered = render("minor = 4\n---\n{{ minor | int + 1 }}", &ctx()).unwrap();
        assert_eq!(rendered.text, "5");
    }

    #[test]
    fn test_used_lists_each_variable_once_by_name() {
        let rendered = render("{{ time }} {{ date }} {{ time }}", &ctx()).unwrap();
        assert_eq!(
            rendered.used,
            vec![
                ("date".to_string(), "2012-02-12".to_string()),
                ("time".to_string(), "1329040800".to_string()),
            ]
        );
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let doc = Document::parse("a = {{ time }}\n---\n{{ a }}-{{ date }}\n").unwrap();
        let ctx = ctx();
        assert_eq!(doc.render(&ctx).unwrap(), doc.render(&ctx).unwrap());
    }

    #[test]
    fn test_empty_document() {
        let rendered = render("", &ctx()).unwrap();
        assert_eq!(rendered.text, "");
    }

    #[test]
    fn test_context_lookup_prefers_defines() {
        let ctx = ctx().with_define("time", "42");
        assert_eq!(ctx.get("time"), Some("42"));
        assert_eq!(ctx.get("date"), Some("2012-02-12"));
        assert_eq!(ctx.get("nope"), None);
    }

    #[test]
    fn test_mentions_whole_identifiers_only() {
        assert!(mentions("{{ year }}", "year"));
        assert!(!mentions("{{ years }}", "year"));
        assert!(!mentions("{{ _year }}", "year"));
    }
}
