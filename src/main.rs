use clap::Parser;
use img2poly::collision::{point_in_polygon_ray_casting, point_in_polygon_triangles, sat};
use img2poly::{Polygon, ThresholdMethod, TracingConfig, Vector};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "img2poly",
    about = "Trace black blobs of a bitmap into polygons and test them for overlap"
)]
struct Cli {
    /// Input image path (PNG, JPEG, BMP)
    #[arg(short, long)]
    input: PathBuf,

    /// Binarize with a fixed brightness threshold (0-255) before tracing.
    /// Without it, any pixel that is not pure white is foreground.
    #[arg(long)]
    threshold: Option<u8>,

    /// Binarize with Otsu's method before tracing
    #[arg(long, conflicts_with = "threshold")]
    otsu: bool,

    /// Swap foreground and background (implies Otsu without --threshold)
    #[arg(long)]
    invert: bool,

    /// Maximum number of blobs (default: width * height)
    #[arg(long)]
    max_shapes: Option<usize>,

    /// Maximum walk steps per blob (default: 8 * width * height + 8)
    #[arg(long)]
    max_steps: Option<usize>,

    /// RDP tolerance in pixels applied before triangulation (0 = off)
    #[arg(long, default_value = "0")]
    simplify: f64,

    /// Hit-test a point "X,Y" against every traced polygon
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    point: Option<Vector>,
}

fn parse_point(s: &str) -> Result<Vector, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| e.to_string())?;
    Vector::try_from(components.as_slice()).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let threshold = match (cli.threshold, cli.otsu) {
        (Some(t), _) => Some(ThresholdMethod::Fixed(t)),
        (None, true) => Some(ThresholdMethod::Otsu),
        (None, false) => None,
    };
    let config = TracingConfig {
        threshold,
        invert: cli.invert,
        max_shapes: cli.max_shapes,
        max_steps: cli.max_steps,
        simplify_epsilon: cli.simplify,
        ..TracingConfig::default()
    };

    // Header
    eprintln!();
    eprintln!("  img2poly \u{00b7} {}", cli.input.display());
    eprintln!();

    let t_start = Instant::now();
    let grid = img2poly::load_grid(&cli.input, &config)?;
    let threshold_name = match config.threshold {
        Some(ThresholdMethod::Fixed(t)) => format!("fixed {}", t),
        Some(ThresholdMethod::Otsu) => "Otsu".to_string(),
        None if config.invert => "Otsu".to_string(),
        None => "none".to_string(),
    };
    eprintln!(
        "  Load        {}x{} px, threshold {}",
        grid.width(),
        grid.height(),
        threshold_name
    );

    let result = img2poly::trace(&grid, &config)?;
    eprintln!(
        "  Trace       {} shapes \u{00b7} {} pixels claimed  ({}ms)",
        result.shapes.len(),
        result.visited.len(),
        t_start.elapsed().as_millis()
    );

    let polygons = img2poly::meshes(&result, &config);

    // Per-shape summary
    for (i, (shape, mesh)) in result.shapes.iter().zip(&polygons).enumerate() {
        let b = shape.bounds();
        let mesh_info = match mesh {
            Some(m) => format!(
                "{} vertices, {} triangles, {}",
                m.vertices().len(),
                m.triangle_count(),
                if m.is_concave() { "concave" } else { "convex" }
            ),
            None => "no polygon".to_string(),
        };
        eprintln!(
            "  Shape {:<5} {} points \u{00b7} {}x{} at ({}, {}) \u{00b7} {:?} \u{00b7} {}",
            i,
            shape.len(),
            b.w + 1.0,
            b.h + 1.0,
            b.x,
            b.y,
            shape.closed_by,
            mesh_info
        );
    }

    // Pairwise overlap
    let mut overlaps = 0;
    for (i, a) in polygons.iter().enumerate() {
        let Some(a) = a else { continue };
        for (j, b) in polygons.iter().enumerate().skip(i + 1) {
            let Some(b) = b else { continue };
            if let Some(mtv) = sat(a, b) {
                overlaps += 1;
                eprintln!(
                    "  Overlap     {} \u{00d7} {}  depth {:.3}  normal ({:.3}, {:.3})",
                    i, j, mtv.depth, mtv.normal.x, mtv.normal.y
                );
            }
        }
    }
    if overlaps == 0 {
        eprintln!("  Overlap     none");
    }

    // Optional hit test
    if let Some(p) = cli.point {
        let mut hits = 0;
        for (i, mesh) in polygons.iter().enumerate() {
            let Some(mesh) = mesh else { continue };
            let by_triangles = point_in_polygon_triangles(&p, mesh);
            let by_ray = point_in_polygon_ray_casting(&p, mesh);
            if by_triangles || by_ray {
                hits += 1;
                eprintln!(
                    "  Point       ({}, {}) in shape {}  (triangles: {}, ray: {})",
                    p.x, p.y, i, by_triangles, by_ray
                );
            }
        }
        if hits == 0 {
            eprintln!("  Point       ({}, {}) outside every shape", p.x, p.y);
        }
    }

    // Footer
    eprintln!();
    eprintln!("  \u{2713} {} shapes", result.shapes.len());

    Ok(())
}
