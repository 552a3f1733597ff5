use crate::commands::{CmdMessage, CmdResult, RepokitPaths};
use crate::config::RepokitConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &RepokitPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.config_dir();
    let mut config = RepokitConfig::load(&dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(value) => result.add_message(CmdMessage::info(value)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(&dir)?;
            let display = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display)));
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_show() {
        let temp = TempDir::new().unwrap();
        let paths = RepokitPaths::new(temp.path());

        run(
            &paths,
            ConfigAction::Set("readme-heading".into(), "Data".into()),
        )
        .unwrap();
        let result = run(&paths, ConfigAction::ShowKey("readme-heading".into())).unwrap();

        assert_eq!(result.messages[0].content, "Data");
        assert_eq!(
            RepokitConfig::load(paths.config_dir())
                .unwrap()
                .readme_heading,
            "Data"
        );
    }

    #[test]
    fn test_bad_values_are_reported_not_saved() {
        let temp = TempDir::new().unwrap();
        let paths = RepokitPaths::new(temp.path());

        let result = run(
            &paths,
            ConfigAction::Set("archive-threshold".into(), "lots".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!RepokitConfig::exists_in(paths.config_dir()));
    }

    #[test]
    fn test_show_all_returns_config() {
        let temp = TempDir::new().unwrap();
        let result = run(&RepokitPaths::new(temp.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(RepokitConfig::default()));
    }
}
