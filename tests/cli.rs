use hide::Carrier;
use std::error::Error;
use std::process::Command;
use tempfile::tempdir;

fn hide_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hide"))
}

#[test]
fn encode_decode_via_binary() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let secret = dir.path().join("secret.txt");
    let recovered = dir.path().join("recovered.txt");

    Carrier::filled(64, 64, 200)?.save(&cover)?;
    std::fs::write(&secret, b"HelloWorld")?;

    let status = hide_cmd()
        .arg("encode")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(&stego)
        .arg("-e")
        .arg(&secret)
        .args(["-p", "test", "--rounds", "1000", "--level", "medium"])
        .status()?;
    assert!(status.success());
    assert!(stego.exists());

    let status = hide_cmd()
        .arg("decode")
        .arg("-i")
        .arg(&stego)
        .arg("-o")
        .arg(&recovered)
        .args(["-p", "test", "--rounds", "1000"])
        .status()?;
    assert!(status.success());
    assert_eq!(std::fs::read(&recovered)?, b"HelloWorld");

    let output = hide_cmd()
        .arg("decode")
        .arg("-i")
        .arg(&stego)
        .arg("-o")
        .arg(dir.path().join("nope.txt"))
        .args(["-p", "wrong", "--rounds", "1000"])
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid key or corrupt file"));
    assert!(!dir.path().join("nope.txt").exists());

    Ok(())
}

#[test]
fn decode_uses_embedded_name() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let secret = dir.path().join("notes.md");
    let work = dir.path().join("work");
    std::fs::create_dir(&work)?;

    Carrier::filled(64, 64, 1)?.save(&cover)?;
    std::fs::write(&secret, b"# notes")?;

    let status = hide_cmd()
        .arg("encode")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(&stego)
        .arg("-e")
        .arg(&secret)
        .args(["-p", "pw", "--rounds", "1000"])
        .status()?;
    assert!(status.success());

    let status = hide_cmd()
        .current_dir(&work)
        .arg("decode")
        .arg("-i")
        .arg(&stego)
        .args(["-p", "pw", "--rounds", "1000"])
        .status()?;
    assert!(status.success());
    assert_eq!(std::fs::read(work.join("notes.md"))?, b"# notes");
    Ok(())
}

#[test]
fn password_from_stdin() -> Result<(), Box<dyn Error>> {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let secret = dir.path().join("s.txt");
    let recovered = dir.path().join("r.txt");
    Carrier::filled(64, 64, 50)?.save(&cover)?;
    std::fs::write(&secret, b"prompted")?;

    let status = hide_cmd()
        .arg("encode")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(&stego)
        .arg("-e")
        .arg(&secret)
        .args(["-p", "typed", "--rounds", "1000"])
        .status()?;
    assert!(status.success());

    let mut child = hide_cmd()
        .arg("decode")
        .arg("-i")
        .arg(&stego)
        .arg("-o")
        .arg(&recovered)
        .args(["--rounds", "1000"])
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("no stdin")?
        .write_all(b"typed\n")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Password:"));
    assert_eq!(std::fs::read(&recovered)?, b"prompted");
    Ok(())
}

#[test]
fn info_reports_capacity() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    Carrier::filled(64, 64, 0)?.save(&cover)?;

    let output = hide_cmd().arg("info").arg(&cover).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("64x64"));

    let output = hide_cmd().arg("info").arg(&cover).arg("--json").output()?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["levels"][2]["level"], "high");
    Ok(())
}

#[test]
fn version_flag() -> Result<(), Box<dyn Error>> {
    let output = hide_cmd().arg("-V").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.starts_with("hide "));
    Ok(())
}

#[test]
fn missing_carrier_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let output = hide_cmd()
        .arg("info")
        .arg(dir.path().join("missing.png"))
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.starts_with("Error:"));
    Ok(())
}
