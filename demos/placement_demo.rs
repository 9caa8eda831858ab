//! Complete workflow demonstration for prism_placement
//!
//! Run with `RUST_LOG=prism_placement=debug` to see the generator's events.

use prism_placement::*;
use tracing_subscriber::EnvFilter;

fn print_points(scene: &Scene) {
    for p in scene.points() {
        println!(
            "  {:<3} ({:.1}, {:.1}, {:.1}) {:?}{}",
            p.name,
            p.position.x,
            p.position.y,
            p.position.z,
            p.role,
            if p.is_invalid() { "  INVALID" } else { "" }
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== prism_placement Demo ===\n");

    // Step 1: Default scene
    println!("Step 1: Default scene");
    let mut scene = Scene::default();
    println!("  Surface: {:.2} m2", scene.surface_area());
    println!("  Volume: {:.2} m3", scene.volume());
    let report = scene.validate_report();
    println!("  Valid: {}", report.is_valid());
    for v in &report.violations {
        println!("    {:?}: {} {:?}", v.rule, v.first, v.second);
    }
    print_points(&scene);

    // Step 2: Fix the source sitting on the boundary
    println!("\nStep 2: Moving F2 off the top edge");
    let ok = scene.move_point_2d("F2", DVec2::new(4.0, 2.0))?;
    println!("  Valid: {}", ok);

    // Step 3: Generate movable points
    println!("\nStep 3: Generating points...");
    let config = GeneratorConfigBuilder::new().seed(12345).build()?;
    let outcome = scene.generate_micros(&config);
    println!(
        "  Placed {} points in {} attempts (success={}, valid={})",
        outcome.placed, outcome.attempts, outcome.success, outcome.scene_valid
    );
    if outcome.needs_warning() {
        println!("  WARNING: placement incomplete or invalid");
    }
    print_points(&scene);

    // Step 4: Drag a point onto a source
    println!("\nStep 4: Dragging a point next to F1");
    if let Some(name) = scene.micros().first().map(|p| p.name.clone()) {
        let ok = scene.move_point_2d(&name, DVec2::new(1.3, 1.2))?;
        println!("  Moved {} -> valid: {}", name, ok);
        print_points(&scene);
    }

    // Step 5: Shrink the footprint and retry
    println!("\nStep 5: Narrow footprint");
    scene.set_vertex(1, DVec2::new(0.8, 0.0))?;
    scene.set_vertex(2, DVec2::new(0.8, 3.0))?;
    let outcome = scene.generate_micros(&config);
    println!(
        "  Placed {} points in {} attempts (success={})",
        outcome.placed, outcome.attempts, outcome.success
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
