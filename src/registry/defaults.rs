//! Default artifacts and hooks deployed into every project.
//!
//! These are factories rather than statics: each call builds fresh registries
//! so concurrent or repeated installs never share state.
use serde_json::{Value, json};

use super::{ArtifactEntry, ArtifactRegistry, HookEntry, HookRegistry};
use crate::format::{HeaderFormatter, Lines, Pipeline, Yaml};

/// Linter configuration file.
pub const ESLINT_CONFIG: &str = ".eslintrc.yaml";
/// Linter ignore list.
pub const ESLINT_IGNORE: &str = ".eslintignore";
/// Formatter configuration file.
pub const PRETTIER_CONFIG: &str = ".prettierrc.yaml";
/// Formatter ignore list.
pub const PRETTIER_IGNORE: &str = ".prettierignore";

/// Hook run before each commit.
pub const PRE_COMMIT: &str = "pre-commit";
/// Hook run before each push.
pub const PRE_PUSH: &str = "pre-push";

/// Command that lints the whole project.
pub const LINT_COMMAND: &str = "npx --no-install eslint .";

/// Marker opening the documented command region of a hook script.
pub const COMMANDS_TAG_START: &str = "# tag::commands[]";
/// Marker closing the documented command region of a hook script.
pub const COMMANDS_TAG_END: &str = "# end::commands[]";

fn eslint_configuration() -> Value {
    json!({ "extends": ["@r2d2bzh"] })
}

fn eslint_ignore() -> Value {
    json!(["node_modules"])
}

fn prettier_configuration() -> Value {
    json!({
        "singleQuote": true,
        "semi": true,
        "tabWidth": 2,
        "printWidth": 120,
    })
}

fn prettier_ignore() -> Value {
    json!(["__fixtures__", "helm", "*.json", "*.yml", "*.yaml"])
}

/// Build the default artifact registry, decorating every file with `header`.
#[must_use]
pub fn artifacts(header: &HeaderFormatter) -> ArtifactRegistry {
    let yaml = || Pipeline::new().then(Yaml).then(header.clone());
    let lines = || Pipeline::new().then(Lines).then(header.clone());
    ArtifactRegistry::new()
        .with(ArtifactEntry::new(ESLINT_CONFIG, eslint_configuration(), yaml()))
        .with(ArtifactEntry::new(ESLINT_IGNORE, eslint_ignore(), lines()))
        .with(ArtifactEntry::new(
            PRETTIER_CONFIG,
            prettier_configuration(),
            yaml(),
        ))
        .with(ArtifactEntry::new(PRETTIER_IGNORE, prettier_ignore(), lines()))
}

/// Wrap `commands` between the documentation region markers.
#[must_use]
pub fn tagged<I, S>(commands: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    std::iter::once(COMMANDS_TAG_START.to_string())
        .chain(commands.into_iter().map(Into::into))
        .chain(std::iter::once(COMMANDS_TAG_END.to_string()))
        .collect()
}

/// Build the default hook registry.
///
/// `tool` is the name of this executable as invoked from a hook; the pre-push
/// hook uses it to skip linting on work-in-progress branches.
#[must_use]
pub fn hooks(tool: &str) -> HookRegistry {
    HookRegistry::new()
        .with(HookEntry::new(PRE_COMMIT, tagged([LINT_COMMAND])))
        .with(HookEntry::new(
            PRE_PUSH,
            tagged([format!("{tool} is-wip || {LINT_COMMAND} && npm test")]),
        ))
}
