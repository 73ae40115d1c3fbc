use crate::error::Result;
use stamp::{Context, Document, Rendered};
use tracing::debug;

/// Parses `source` as a version file and renders it against `ctx`.
pub fn run(source: &str, ctx: &Context) -> Result<Rendered> {
    let document = Document::parse(source)?;
    let rendered = document.render(ctx)?;

    for (name, value) in &rendered.declared {
        debug!("declared {} = {}", name, value);
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Define, DEFAULT_CONTENT};
    use crate::error::BumpError;
    use crate::variables::environment;
    use chrono::{TimeZone, Utc};

    fn ctx(defines: &[Define]) -> Context {
        environment(Utc.with_ymd_and_hms(2012, 2, 12, 10, 0, 0).unwrap(), defines)
    }

    #[test]
    fn default_content_renders_with_builtins_only() {
        let rendered = run(DEFAULT_CONTENT, &ctx(&[])).unwrap();

        assert!(rendered.text.starts_with("/* Generated by bump. Do not edit. */\n"));
        assert!(rendered.text.contains("#define VERSION        \"0.1.0\"\n"));
        assert!(rendered.text.contains("#define BUILD_TIME     1329040800\n"));
        assert!(rendered.text.contains("#define BUILD_DATE     \"2012-02-12\"\n"));
        assert!(!rendered.text.contains("{{"));
    }

    #[test]
    fn defines_override_default_declarations() {
        let defines = [Define::new("minor", "7"), Define::new("patch", "3")];
        let rendered = run(DEFAULT_CONTENT, &ctx(&defines)).unwrap();

        assert!(rendered.text.contains("#define VERSION        \"0.7.3\"\n"));
        assert!(rendered.text.contains("#define VERSION_MINOR  7\n"));
    }

    #[test]
    fn time_define_overrides_builtin() {
        let rendered = run("{{ time }}", &ctx(&[Define::new("time", "42")])).unwrap();
        assert_eq!(rendered.text, "42");
    }

    #[test]
    fn undefined_variable_is_a_template_error() {
        let err = run("line one\n{{ buildcfg }}\n", &ctx(&[])).unwrap_err();

        assert!(matches!(err, BumpError::Template(_)));
        assert_eq!(
            err.to_string(),
            "undefined variable 'buildcfg' at line 2"
        );
    }

    #[test]
    fn rendering_twice_gives_identical_output() {
        let ctx = ctx(&[Define::new("buildcfg", "release")]);
        let first = run(DEFAULT_CONTENT, &ctx).unwrap();
        let second = run(DEFAULT_CONTENT, &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn used_variables_are_reported() {
        let rendered = run("{{ year }}-{{ buildcfg }}", &ctx(&[Define::new("buildcfg", "debug")]))
            .unwrap();
        assert_eq!(
            rendered.used,
            vec![
                ("buildcfg".to_string(), "debug".to_string()),
                ("year".to_string(), "2012".to_string()),
            ]
        );
    }
}
