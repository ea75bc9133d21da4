//! # OptiCalc CLI Application
//!
//! Terminal front end for the dispensing calculators: pick a tool, enter
//! the parameters, read the formatted result. Every run also prints the
//! JSON form of the result (or of the error) for LLM/API use.

use std::io::{self, BufRead, Write};

use optics_core::calculations::blank_size::{self, FrameBlankInput};
use optics_core::calculations::prism::{self, PrismInput};
use optics_core::calculations::thickness::{self, ThicknessInput, ThicknessKind};
use optics_core::calculations::transposition::{self, TranspositionInput};
use optics_core::calculations::vertex::{self, VertexInput};
use optics_core::OpticsError;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("OptiCalc CLI - Dispensing Optics Calculator");
    println!("===========================================");
    println!();
    println!("  1. Lens thickness (spherical)");
    println!("  2. Induced prism (Prentice's rule)");
    println!("  3. Vertex distance compensation");
    println!("  4. Prescription transposition");
    println!("  5. Minimum blank size (frame)");
    println!();

    let choice = prompt_f64("Choose a tool [1]: ", 1.0) as u32;
    println!();

    match choice {
        2 => run_prism(),
        3 => run_vertex(),
        4 => run_transposition(),
        5 => run_blank_size(),
        _ => run_thickness(),
    }
}

fn run_thickness() {
    let sphere_d = prompt_f64("Sphere power (D) [-4.00]: ", -4.0);
    let refractive_index = prompt_f64("Refractive index [1.498]: ", 1.498);
    let diameter_mm = prompt_f64("Blank diameter (mm) [70.0]: ", 70.0);
    let min_thickness_mm = prompt_f64("Minimum thickness (mm) [2.0]: ", 2.0);

    let input = ThicknessInput {
        sphere_d,
        refractive_index,
        diameter_mm,
        min_thickness_mm,
    };

    match thickness::calculate(&input) {
        Ok(result) => {
            banner("LENS THICKNESS");
            println!("Input:");
            println!("  Power:    {:+.2} D", input.sphere_d);
            println!("  Index:    {:.3}", input.refractive_index);
            println!("  Diameter: {:.1} mm", input.diameter_mm);
            println!();
            let kind = match result.kind {
                ThicknessKind::Center => "center",
                ThicknessKind::Edge => "edge",
            };
            println!("Result:");
            println!("  Sagitta:          {:.2} mm", result.sagitta_mm);
            println!("  {} thickness: {:.2} mm", capitalize(kind), result.thickness_mm);
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_prism() {
    let power_d = prompt_f64("Lens power (D) [4.00]: ", 4.0);
    let decentration_mm = prompt_f64("Decentration (mm) [3.0]: ", 3.0);

    match prism::calculate(&PrismInput {
        power_d,
        decentration_mm,
    }) {
        Ok(result) => {
            banner("INDUCED PRISM");
            println!("  {:.2} D decentred {:.1} cm", power_d.abs(), result.decentration_cm);
            println!("  Induced prism: {:.2} Δ", result.prism_diopters);
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_vertex() {
    let power_d = prompt_f64("Power as refracted (D) [10.00]: ", 10.0);
    let original_vertex_mm = prompt_f64("Refracted vertex distance (mm) [12.0]: ", 12.0);
    let new_vertex_mm = prompt_f64("Fitted vertex distance (mm) [10.0]: ", 10.0);

    match vertex::calculate(&VertexInput {
        power_d,
        original_vertex_mm,
        new_vertex_mm,
    }) {
        Ok(result) => {
            banner("VERTEX COMPENSATION");
            println!("  Vertex change:     {:+.1} mm", result.vertex_change_mm);
            println!("  Compensated power: {:+.2} D", result.compensated_power_d);
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_transposition() {
    let sphere_d = prompt_f64("Sphere (D) [-2.00]: ", -2.0);
    let cylinder_d = prompt_f64("Cylinder (D) [-1.00]: ", -1.0);
    let axis_deg = prompt_f64("Axis (deg) [90]: ", 90.0);

    match transposition::calculate(&TranspositionInput {
        sphere_d,
        cylinder_d,
        axis_deg,
    }) {
        Ok(result) => {
            banner("TRANSPOSED PRESCRIPTION");
            println!(
                "  {:+.2} {:+.2} x {:.0}",
                result.sphere_d, result.cylinder_d, result.axis_deg
            );
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_blank_size() {
    let eye_size_mm = prompt_f64("Eye size (mm) [50.0]: ", 50.0);
    let bridge_size_mm = prompt_f64("Bridge size (mm) [20.0]: ", 20.0);
    let patient_pd_mm = prompt_f64("Patient PD (mm) [64.0]: ", 64.0);

    match blank_size::calculate_from_frame(&FrameBlankInput {
        eye_size_mm,
        bridge_size_mm,
        patient_pd_mm,
    }) {
        Ok(result) => {
            banner("MINIMUM BLANK SIZE");
            println!("  Frame PD:      {:.1} mm", result.frame_pd_mm);
            println!("  Decentration:  {:.1} mm", result.decentration_mm);
            println!("  Minimum blank: {:.1} mm", result.minimum_blank_mm);
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    println!();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!();
    println!("JSON Output (for LLM/API use):");
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

fn print_error(e: &OpticsError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
