fn main() {
    // Stamp dev builds with the commit they came from; `--version` on a
    // checkout then reads e.g. `0.4.0+3f1c2ab`. Release archives built
    // outside a git checkout get the plain crate version.
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    println!("cargo:rustc-env=GIT_HASH={hash}");
}
