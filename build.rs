// Build script embedding the commit and target into `idfa --version`

use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

fn main() {
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=IDFA_GIT_HASH={}", git(&["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=IDFA_GIT_DATE={}", git(&["log", "-1", "--format=%cs"]));
    println!("cargo:rustc-env=IDFA_BUILD_TARGET={target}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
