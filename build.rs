use std::process::Command;

fn main() {
    // Only rebuild CSS when template or CSS files change
    println!("cargo:rerun-if-changed=assets/css/input.css");
    println!("cargo:rerun-if-changed=templates/");

    // Try to run Tailwind CSS standalone CLI
    let status = Command::new("tailwindcss")
        .args([
            "-i",
            "assets/css/input.css",
            "-o",
            "assets/css/output.css",
            "--minify",
        ])
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Tailwind CSS compiled successfully");
        }
        _ => {
            // Without Tailwind the stylesheet is plain CSS once the
            // directives are dropped.
            println!("cargo:warning=Tailwind CLI not found, using plain stylesheet");
            let input = std::fs::read_to_string("assets/css/input.css").unwrap_or_default();
            let plain: String = input
                .lines()
                .filter(|line| !line.trim_start().starts_with("@tailwind"))
                .map(|line| format!("{}\n", line))
                .collect();
            std::fs::create_dir_all("assets/css").ok();
            std::fs::write("assets/css/output.css", plain).ok();
        }
    }
}
