//! Settings command implementation
//!
//! Only the options given are changed. An empty value removes the setting.

use crate::commands::report;
use crate::error::CliResult;
use crate::utils::config::{apply_setting, settings_path, Settings};

pub struct Options {
    pub server: Option<String>,
    pub account: Option<String>,
    pub project: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn apply(settings: &mut Settings, options: &Options) {
    apply_setting(&mut settings.server_url, options.server.as_deref());
    apply_setting(&mut settings.account, options.account.as_deref());
    apply_setting(&mut settings.project, options.project.as_deref());
}

fn run_inner(options: &Options) -> CliResult<()> {
    let path = settings_path()?;
    let mut settings = Settings::load_from(&path)?;
    apply(&mut settings, options);
    settings.save_to(&path)?;
    println!("✓ Settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::EnvGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut settings = Settings {
            server_url: Some("http://old".to_string()),
            account: Some("acme".to_string()),
            project: Some("web".to_string()),
            ..Settings::default()
        };
        apply(
            &mut settings,
            &Options {
                server: None,
                account: Some("globex".to_string()),
                project: Some(String::new()),
            },
        );
        assert_eq!(settings.server_url.as_deref(), Some("http://old"));
        assert_eq!(settings.account.as_deref(), Some("globex"));
        assert_eq!(settings.project, None);
    }

    #[test]
    #[serial]
    fn test_run_writes_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let _home = EnvGuard::set("SF_HOME", temp_dir.path().to_str().unwrap());

        let options = Options {
            server: Some("http://localhost:8080".to_string()),
            account: None,
            project: Some("web".to_string()),
        };
        run_inner(&options).unwrap();

        let saved = Settings::load_from(&temp_dir.path().join("settings.yaml")).unwrap();
        assert_eq!(saved.server_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(saved.project.as_deref(), Some("web"));
        assert_eq!(saved.account, None);
    }
}
