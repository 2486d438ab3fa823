//! Minimal placeholder templates.
//!
//! Supports `{{ .Shell }}`, `{{ .Path }}`, `{{ .Folder }}`, `{{ .User }}`,
//! `{{ .Host }}` and `{{ .Env.NAME }}`. Unknown placeholders render empty and
//! an unterminated `{{` is kept as literal text.

use crate::env::Environment;

/// Default transient prompt: the shell name followed by `> `.
pub const DEFAULT_TRANSIENT_TEMPLATE: &str = "{{ .Shell }}> ";

pub fn render_template(template: &str, env: &dyn Environment) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        out.push_str(&resolve(after[..close].trim(), env));
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

fn resolve(key: &str, env: &dyn Environment) -> String {
    if let Some(name) = key.strip_prefix(".Env.") {
        return env.env_var(name).unwrap_or_default();
    }
    match key {
        ".Shell" => env.shell_name().to_string(),
        ".Path" => display_path(env),
        ".Folder" => folder_name(env),
        ".User" => env.user_name(),
        ".Host" => env.host_name(),
        _ => String::new(),
    }
}

/// Working directory with the home prefix replaced by `~`.
pub fn display_path(env: &dyn Environment) -> String {
    let cwd = env.current_dir();
    match env.home_dir() {
        Some(home) if !home.is_empty() && cwd.starts_with(&home) => {
            let tail = &cwd[home.len()..];
            if tail.is_empty() || tail.starts_with(['/', '\\']) {
                format!("~{tail}")
            } else {
                cwd
            }
        }
        _ => cwd,
    }
}

/// Last component of the working directory, `~` at home.
pub fn folder_name(env: &dyn Environment) -> String {
    let path = display_path(env);
    if path == "~" {
        return path;
    }
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnvironment;
    use crate::shell::Shell;

    fn env() -> StaticEnvironment {
        StaticEnvironment::new(Shell::Zsh)
            .with_cwd("/home/user/src/promptline")
            .with_var("AWS_PROFILE", "prod")
    }

    #[test]
    fn substitutes_known_placeholders() {
        let text = render_template("{{ .Shell }} in {{ .Folder }} [{{.Env.AWS_PROFILE}}]", &env());
        assert_eq!(text, "zsh in promptline [prod]");
    }

    #[test]
    fn default_transient_template() {
        assert_eq!(render_template(DEFAULT_TRANSIENT_TEMPLATE, &env()), "zsh> ");
    }

    #[test]
    fn unknown_and_unterminated_placeholders() {
        assert_eq!(render_template("a{{ .Nope }}b", &env()), "ab");
        assert_eq!(render_template("a {{ .Shell", &env()), "a {{ .Shell");
    }

    #[test]
    fn home_is_abbreviated() {
        assert_eq!(display_path(&env()), "~/src/promptline");
        let home = env().with_cwd("/home/user");
        assert_eq!(folder_name(&home), "~");
        let sibling = env().with_cwd("/home/username");
        assert_eq!(display_path(&sibling), "/home/username");
    }
}
