use anyhow::Result;
use handyman_directory::config::ENV_VARS;
use std::process::Command;
use tempfile::TempDir;

fn sitemap_command(dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_handyman-directory"));
    command.current_dir(dir.path());
    for name in ENV_VARS {
        command.env_remove(name);
    }
    command
}

#[test]
fn test_missing_configuration_exits_non_zero_without_output() -> Result<()> {
    let dir = TempDir::new()?;

    let output = sitemap_command(&dir).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("public/sitemap.xml").exists());
    assert!(!dir.path().join("public").exists());
    Ok(())
}

#[test]
fn test_missing_key_exits_non_zero_without_output() -> Result<()> {
    let dir = TempDir::new()?;

    let output = sitemap_command(&dir)
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SUPABASE_SERVICE_ROLE_KEY"));
    assert!(!dir.path().join("public/sitemap.xml").exists());
    Ok(())
}

#[test]
fn test_unreachable_store_exits_non_zero_without_output() -> Result<()> {
    let dir = TempDir::new()?;

    let output = sitemap_command(&dir)
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .env("SUPABASE_KEY", "key")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("public/sitemap.xml").exists());
    Ok(())
}
