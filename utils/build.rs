use std::process::Command;

fn main() {
    println!(
        "cargo:rustc-env=BUILD_DATE={}",
        chrono::Utc::now().to_rfc3339()
    );

    for (var, args) in [
        ("BUILD_COMMIT", ["rev-parse", "--short", "HEAD"]),
        ("BUILD_BRANCH", ["rev-parse", "--abbrev-ref", "HEAD"]),
    ] {
        let value = git(&args).unwrap_or_else(|| "unknown".to_owned());
        println!("cargo:rustc-env={var}={value}");
    }

    println!("cargo:rerun-if-changed=../.git/HEAD");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_owned())
}
