use std::process::Command;

fn main() {
    // Embed `git describe` output so `conic --version` identifies the build
    let describe = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=CONIC_BUILD_SHA={}", describe);
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
