/// Example program to print the loaded motion configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Motion Configuration ===\n");

    println!("Motion Settings:");
    println!("  Reduced Motion: {}", config.motion.reduced_motion);
    println!("  Tween Duration: {}ms", config.motion.tween_duration_ms);
    println!("  Keyframes Duration: {}ms", config.motion.keyframes_duration_ms);
    println!(
        "  Spring: stiffness={} damping={} mass={}",
        config.motion.spring_stiffness, config.motion.spring_damping, config.motion.spring_mass
    );
    println!(
        "  Scale Spring: stiffness={} damping={}",
        config.motion.scale_spring_stiffness, config.motion.scale_spring_damping
    );
    println!();

    println!("Viewport Settings:");
    println!("  Amount: {}", config.viewport.amount);
    println!("  Once: {}", config.viewport.once);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
