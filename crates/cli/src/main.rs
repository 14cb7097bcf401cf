use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use sdmesh::mesh::{Mesh, MeshCfg};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;
mod svg;

use provenance::{provenance_path, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Commit SDF scenes into boundary polygons")]
struct Cmd {
    /// Log every commit at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Commit a scene and write the polygon as JSON (and optionally SVG)
    Run {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        svg: Option<PathBuf>,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Print a polygon summary for a scene
    Report {
        #[arg(long)]
        scene: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
}

/// Overrides for the sampling pipeline.
#[derive(Args, Clone, Debug, Default)]
struct Tuning {
    /// Grid samples per world unit
    #[arg(long)]
    scale: Option<f64>,
    /// World-unit margin around the shapes
    #[arg(long)]
    padding: Option<f64>,
    /// Douglas–Peucker tolerance in grid units
    #[arg(long)]
    eps: Option<f64>,
}

impl Tuning {
    fn cfg(&self) -> Result<MeshCfg> {
        let mut cfg = MeshCfg::default();
        if let Some(s) = self.scale {
            ensure!(s.is_finite() && s > 0.0, "--scale must be > 0, got {s}");
            cfg.scale = s;
        }
        if let Some(p) = self.padding {
            ensure!(p.is_finite() && p >= 0.0, "--padding must be >= 0, got {p}");
            cfg.padding = p;
        }
        if let Some(e) = self.eps {
            ensure!(e.is_finite() && e >= 0.0, "--eps must be >= 0, got {e}");
            cfg.simplify_eps = e;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run {
            scene,
            out,
            svg,
            tuning,
        } => run(&scene, &out, svg.as_deref(), &tuning),
        Action::Report { scene, tuning } => report(&scene, &tuning),
    }
}

fn commit_scene(path: &Path, tuning: &Tuning) -> Result<(Mesh, MeshCfg)> {
    let cfg = tuning.cfg()?;
    let scene = scene::load(path)?;
    let mesh = scene::build(&scene, cfg)?;
    Ok((mesh, cfg))
}

fn cfg_params(cfg: &MeshCfg) -> serde_json::Value {
    json!({
        "scale": cfg.scale,
        "padding": cfg.padding,
        "simplify_eps": cfg.simplify_eps,
        "iso_level": cfg.iso_level,
    })
}

fn summary(mesh: &Mesh) -> serde_json::Value {
    let poly = mesh.polygon();
    let bb = mesh.bounding_box();
    json!({
        "vertices": poly.len(),
        "rings": poly.rings().len(),
        "area": poly.area(),
        "perimeter": poly.rings().iter().map(|r| sdmesh::geom2::perimeter(r)).sum::<f64>(),
        "centroid": poly.centroid().map(|c| [c.x, c.y]),
        "bbox": {"position": [bb.position.x, bb.position.y], "size": [bb.size.x, bb.size.y]},
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run(scene_path: &Path, out: &Path, svg_out: Option<&Path>, tuning: &Tuning) -> Result<()> {
    tracing::info!(scene = %scene_path.display(), out = %out.display(), "run");
    let (mesh, cfg) = commit_scene(scene_path, tuning)?;
    if mesh.is_empty() {
        tracing::info!("scene produced an empty polygon");
    }

    let poly = mesh.polygon();
    let doc = json!({
        "summary": summary(&mesh),
        "vertices": poly.vertices().iter().map(|v| [v.x, v.y]).collect::<Vec<_>>(),
        "rings": poly
            .rings()
            .iter()
            .map(|r| r.iter().map(|v| [v.x, v.y]).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    });
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = || Payload::new(cfg_params(&cfg)).with_input(scene_path);
    match svg_out {
        Some(svg_path) => {
            let view = mesh.bounding_box().grow(cfg.padding * 0.25);
            let mut canvas = svg::SvgCanvas::new(view);
            mesh.paint(&mut canvas);
            ensure_parent(svg_path)?;
            std::fs::write(svg_path, canvas.finish())
                .with_context(|| format!("writing {}", svg_path.display()))?;
            tracing::info!(svg = %svg_path.display(), "svg");
            // same stem in the same directory: one sidecar covers both
            if provenance_path(svg_path) == provenance_path(out) {
                write_sidecar(out, payload().with_output(svg_path))?;
            } else {
                write_sidecar(out, payload())?;
                write_sidecar(svg_path, payload())?;
            }
        }
        None => {
            write_sidecar(out, payload())?;
        }
    }
    Ok(())
}

fn report(scene_path: &Path, tuning: &Tuning) -> Result<()> {
    let (mesh, cfg) = commit_scene(scene_path, tuning)?;
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "scene": scene_path.to_string_lossy(),
        "params": cfg_params(&cfg),
        "polygon": summary(&mesh),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCENE: &str = r#"{"ops": [
        {"op": "add", "shape": {"kind": "rectangle", "x": 0, "y": 0, "w": 8, "h": 4}},
        {"op": "add", "shape": {"kind": "circle", "cx": 8, "cy": 2, "r": 2}}
    ]}"#;

    fn coarse() -> Tuning {
        Tuning {
            scale: Some(2.0),
            padding: Some(4.0),
            eps: None,
        }
    }

    #[test]
    fn run_writes_outputs_and_sidecars() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        std::fs::write(&scene, SCENE).unwrap();
        let out = dir.path().join("out/mesh.json");
        let svg = dir.path().join("out/mesh.svg");

        run(&scene, &out, Some(&svg), &coarse()).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert!(doc["vertices"].as_array().unwrap().len() > 3);
        assert_eq!(doc["summary"]["rings"], 1);
        let area = doc["summary"]["area"].as_f64().unwrap();
        let want = 32.0 + std::f64::consts::PI * 2.0;
        assert!((area - want).abs() / want < 0.05, "area {area}");
        assert!(std::fs::read_to_string(&svg).unwrap().starts_with("<svg"));
        let prov: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("out/mesh.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["outputs"].as_array().unwrap().len(), 2);
        assert_eq!(prov["params"]["scale"], 2.0);
    }

    #[test]
    fn tuning_rejects_bad_values() {
        let bad = Tuning {
            scale: Some(0.0),
            ..Tuning::default()
        };
        assert!(bad.cfg().is_err());
        let cfg = coarse().cfg().unwrap();
        assert_eq!((cfg.scale, cfg.padding, cfg.simplify_eps), (2.0, 4.0, 0.1));
    }

    #[test]
    fn missing_scene_reports_the_path() {
        let err = commit_scene(Path::new("/nonexistent/scene.json"), &Tuning::default()).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scene.json"));
    }
}
