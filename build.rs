use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary lives three levels up
    let Some(target_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let _ = fs::copy(config_path, target_dir.join("config.toml"));
    }
}
