use crate::domain::models::Admin;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads the static admin table, preferring an inline JSON array over the
/// seed file. Any read or parse failure is logged and yields an empty table,
/// matching the file variant's startup behavior. The table is never written
/// back.
pub fn load_admins(inline_json: Option<&str>, file: &Path) -> Vec<Admin> {
    let admins = if let Some(raw) = inline_json {
        parse_admins(raw, "ADMINS environment variable")
    } else if file.exists() {
        match fs::read_to_string(file) {
            Ok(raw) => parse_admins(&raw, &file.display().to_string()),
            Err(err) => {
                error!(path = %file.display(), error = %err, "Error reading admin seed file");
                Vec::new()
            }
        }
    } else {
        info!(path = %file.display(), "Admin seed file does not exist");
        Vec::new()
    };
    info!(count = admins.len(), "Admins loaded");
    admins
}

fn parse_admins(raw: &str, source: &str) -> Vec<Admin> {
    match serde_json::from_str(raw) {
        Ok(admins) => admins,
        Err(err) => {
            error!(source = source, error = %err, "Error parsing admin seed data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_json_takes_precedence() {
        let admins = load_admins(
            Some(r#"[{"email": "root@example.com", "password": "secret", "token": null}]"#),
            Path::new("/nonexistent/admin.json"),
        );
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "root@example.com");
    }

    #[test]
    fn test_missing_file_yields_empty_table() {
        let admins = load_admins(None, Path::new("/nonexistent/admin.json"));
        assert!(admins.is_empty());
    }

    #[test]
    fn test_malformed_inline_json_yields_empty_table() {
        let admins = load_admins(Some("not-json"), Path::new("/nonexistent/admin.json"));
        assert!(admins.is_empty());
    }
}
