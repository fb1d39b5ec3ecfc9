// Script content assembly: resolve the body, serialize arguments, append the
// broadcast fragment and persist the result for the host application.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::args::{serialize_variables, Args};
use crate::builder::ScriptBuilder;
use crate::config::Config;
use crate::error::ScriptError;

/// Body used when neither a built-in nor a custom script exists.
pub const EMPTY_BODY: &str = "\"\";";

/// Default extension for built-in and custom command scripts.
const SOURCE_EXTENSION: &str = "js";

static TRAILING_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w+$").expect("static regex should compile"));
static FILENAME_WITH_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\w]+[.]\w+$").expect("static regex should compile"));

/// Strip directory components and a trailing extension: `tools/resize.js` → `resize`.
pub fn command_name(command: &str) -> String {
    let base = command.rsplit(['/', '\\']).next().unwrap_or(command);
    TRAILING_EXTENSION.replace(base, "").into_owned()
}

/// File name of the custom script for `command`, adding `.js` when it has no extension.
pub fn custom_script_filename(command: &str) -> String {
    if FILENAME_WITH_EXTENSION.is_match(command) {
        command.to_string()
    } else {
        format!("{command}.{SOURCE_EXTENSION}")
    }
}

/// Where a resolved script body came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    BuiltIn(PathBuf),
    Custom(PathBuf),
    Empty,
}

/// Generates command scripts for the configured host application.
///
/// Holds only immutable configuration; concurrent `create` calls share nothing.
#[derive(Debug, Clone)]
pub struct ScriptFileCreator {
    config: Config,
}

impl ScriptFileCreator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate the script for `command` and write it to the app's scripts
    /// directory, returning the written path.
    pub async fn create(
        &self,
        command: &str,
        use_built_in_script: bool,
        args: Option<&Args>,
    ) -> Result<PathBuf, ScriptError> {
        let name = command_name(command);
        let content = self.render(command, use_built_in_script, args).await?;
        self.write_script(&name, &content).await
    }

    /// Generate the script text for `command` without writing it.
    pub async fn render(
        &self,
        command: &str,
        use_built_in_script: bool,
        args: Option<&Args>,
    ) -> Result<String, ScriptError> {
        let (body, _) = self.resolve_body(command, use_built_in_script).await;
        let variables = serialize_variables(args);
        let broadcast = self.broadcast_fragment(command);

        ScriptBuilder::new()
            .name(command_name(command))
            .variables(variables)
            .body(body)
            .broadcast(broadcast)
            .build()
    }

    /// Completion fragment for `command` in the configured app's dialect.
    pub fn broadcast_fragment(&self, command: &str) -> String {
        self.config.app.name.dialect().render(&self.config.host, self.config.port, command)
    }

    /// Destination for a script named `command_name`.
    pub fn output_path(&self, command_name: &str) -> PathBuf {
        let extension = self.config.app.name.script_file_type().extension();
        self.config.app.adobe_scripts_dir().join(format!("{command_name}.{extension}"))
    }

    pub fn builtin_script_path(&self, command: &str) -> PathBuf {
        self.config
            .builtin_scripts_dir()
            .join(self.config.app.name.as_str())
            .join(format!("{command}.{SOURCE_EXTENSION}"))
    }

    pub fn custom_script_path(&self, command: &str) -> PathBuf {
        self.config.scripts_path.join(custom_script_filename(command))
    }

    /// Body precedence: built-in (when requested), then custom, then [`EMPTY_BODY`].
    pub async fn resolve_body(&self, command: &str, use_built_in_script: bool) -> (String, BodySource) {
        if use_built_in_script {
            let path = self.builtin_script_path(command);
            if let Some(body) = read_optional(&path).await {
                info!(path = %path.display(), "built-in script file found");
                return (body, BodySource::BuiltIn(path));
            }
        }

        let path = self.custom_script_path(command);
        if let Some(body) = read_optional(&path).await {
            info!(path = %path.display(), "custom script file found");
            return (body, BodySource::Custom(path));
        }

        debug!(command, "no script body found; using empty placeholder");
        (EMPTY_BODY.to_string(), BodySource::Empty)
    }

    async fn write_script(&self, command_name: &str, content: &str) -> Result<PathBuf, ScriptError> {
        let path = self.output_path(command_name);
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let dir_exists = tokio::fs::metadata(&dir).await.map(|meta| meta.is_dir()).unwrap_or(false);
        if !dir_exists {
            return Err(ScriptError::InvalidDirectory(dir));
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| ScriptError::Write { path: path.clone(), source })?;
        info!(path = %path.display(), "wrote script file");
        Ok(path)
    }
}

/// Read a script source; any failure counts as absent.
async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Some(contents),
        Err(error) if error.kind() == ErrorKind::NotFound => None,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "failed to read script source; skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppName;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        builtin: PathBuf,
        custom: PathBuf,
        out: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let builtin = tmp.path().join("builtin");
            let custom = tmp.path().join("custom");
            let out = tmp.path().join("out");
            for dir in [&builtin, &custom, &out] {
                std::fs::create_dir_all(dir).unwrap();
            }
            Self { _tmp: tmp, builtin, custom, out }
        }

        fn creator(&self, app: AppName) -> ScriptFileCreator {
            ScriptFileCreator::new(Config {
                scripts_path: self.custom.clone(),
                builtin_scripts_path: Some(self.builtin.clone()),
                app: AppConfig { name: app, adobe_scripts_path: Some(self.out.clone()) },
                ..Config::default()
            })
        }

        fn write_builtin(&self, app: AppName, command: &str, body: &str) {
            let dir = self.builtin.join(app.as_str());
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(format!("{command}.js")), body).unwrap();
        }

        fn write_custom(&self, filename: &str, body: &str) {
            std::fs::write(self.custom.join(filename), body).unwrap();
        }
    }

    #[test]
    fn command_name_strips_directories_and_extension() {
        assert_eq!(command_name("resize"), "resize");
        assert_eq!(command_name("resize.js"), "resize");
        assert_eq!(command_name("tools/export/layers.jsx"), "layers");
        assert_eq!(command_name("tools\\crop.js"), "crop");
        assert_eq!(command_name("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn custom_filename_adds_js_only_without_extension() {
        assert_eq!(custom_script_filename("resize"), "resize.js");
        assert_eq!(custom_script_filename("resize.jsx"), "resize.jsx");
        assert_eq!(custom_script_filename("export-layers_v2.js"), "export-layers_v2.js");
    }

    #[tokio::test]
    async fn builtin_preferred_when_requested() {
        let fx = Fixture::new();
        fx.write_builtin(AppName::Photoshop, "resize", "builtin();");
        fx.write_custom("resize.js", "custom();");
        let creator = fx.creator(AppName::Photoshop);

        let (body, source) = creator.resolve_body("resize", true).await;
        assert_eq!(body, "builtin();");
        assert!(matches!(source, BodySource::BuiltIn(_)));
    }

    #[tokio::test]
    async fn custom_used_when_builtin_not_requested() {
        let fx = Fixture::new();
        fx.write_builtin(AppName::Photoshop, "resize", "builtin();");
        fx.write_custom("resize.js", "custom();");
        let creator = fx.creator(AppName::Photoshop);

        let (body, source) = creator.resolve_body("resize", false).await;
        assert_eq!(body, "custom();");
        assert_eq!(source, BodySource::Custom(fx.custom.join("resize.js")));
    }

    #[tokio::test]
    async fn custom_used_when_builtin_missing() {
        let fx = Fixture::new();
        fx.write_custom("resize.js", "custom();");
        let (body, _) = fx.creator(AppName::Photoshop).resolve_body("resize", true).await;
        assert_eq!(body, "custom();");
    }

    #[tokio::test]
    async fn builtin_for_other_app_is_ignored() {
        let fx = Fixture::new();
        fx.write_builtin(AppName::Illustrator, "resize", "illustrator();");
        let (body, source) = fx.creator(AppName::Photoshop).resolve_body("resize", true).await;
        assert_eq!(body, EMPTY_BODY);
        assert_eq!(source, BodySource::Empty);
    }

    #[tokio::test]
    async fn custom_filename_with_extension_is_used_verbatim() {
        let fx = Fixture::new();
        fx.write_custom("resize.jsx", "jsx();");
        let (body, _) = fx.creator(AppName::Photoshop).resolve_body("resize.jsx", false).await;
        assert_eq!(body, "jsx();");
    }

    #[tokio::test]
    async fn unreadable_source_falls_through() {
        let fx = Fixture::new();
        // A directory where the custom script should be cannot be read as text.
        std::fs::create_dir_all(fx.custom.join("resize.js")).unwrap();
        let (body, source) = fx.creator(AppName::Photoshop).resolve_body("resize", false).await;
        assert_eq!(body, EMPTY_BODY);
        assert_eq!(source, BodySource::Empty);
    }

    #[tokio::test]
    async fn broadcast_uses_command_as_given() {
        let fx = Fixture::new();
        let text = fx.creator(AppName::Photoshop).render("tools/resize.js", false, None).await.unwrap();
        assert!(text.starts_with("// resize\n"));
        assert!(text.contains(r#"\"command\":\"tools/resize.js\""#));
    }

    #[tokio::test]
    async fn create_writes_under_command_name() {
        let fx = Fixture::new();
        let path = fx.creator(AppName::Illustrator).create("tools/resize.js", false, None).await.unwrap();
        assert_eq!(path, fx.out.join("resize.jsx"));
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn missing_output_directory_is_reported() {
        let fx = Fixture::new();
        let mut creator = fx.creator(AppName::Photoshop);
        let missing = fx.out.join("nope");
        creator.config.app.adobe_scripts_path = Some(missing.clone());

        let err = creator.create("resize", false, None).await.unwrap_err();
        match &err {
            ScriptError::InvalidDirectory(dir) => assert_eq!(dir, &missing),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains(&missing.display().to_string()));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn write_failure_carries_io_error() {
        let fx = Fixture::new();
        // Occupy the destination file name with a directory.
        std::fs::create_dir_all(fx.out.join("resize.jsx")).unwrap();
        let err = fx.creator(AppName::Photoshop).create("resize", false, None).await.unwrap_err();
        assert!(matches!(err, ScriptError::Write { .. }));
    }
}
