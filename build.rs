//! Build script that embeds version information into the binary.

use std::process::Command;

fn main() {
    // Prefer JS_RULES_VERSION if set (e.g., by the release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("JS_RULES_VERSION") {
        println!("cargo:rustc-env=JS_RULES_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=JS_RULES_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=JS_RULES_VERSION");
}
