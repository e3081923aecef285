#[macro_use]
extern crate slog;

extern crate nalgebra_glm as glm;

use clap::{clap_app, value_t};
use drawinfo_rs::common::{IdGenerator, MeshId};
use drawinfo_rs::mesh::{Bake, IndexedGeometry, Mesh};
use drawinfo_rs::procedural;
use drawinfo_rs::upload::{self, DeviceUploader, SyncOptions, VertexLayout};
use slog::Drain;
use std::collections::HashMap;

fn subdivisions_legal(val: String) -> Result<(), String> {
    match val.parse::<usize>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err(String::from("subdivisions must be at least 1")),
        Err(_) => Err(String::from("could not parse arg subdivisions")),
    }
}

fn new_drain(level: slog::Level) -> slog::Fuse<slog::LevelFilter<slog::Fuse<slog_async::Async>>> {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    drain.filter_level(level).fuse()
}

/// Stands in for a graphics backend and only keeps byte counts.
struct LoggingUploader {
    log: slog::Logger,
    resident: HashMap<MeshId, usize>,
}

impl LoggingUploader {
    fn new(log: &slog::Logger) -> Self {
        LoggingUploader {
            log: log.new(o!("module" => "device")),
            resident: HashMap::new(),
        }
    }

    fn resident_bytes(&self) -> usize {
        self.resident.values().sum()
    }
}

impl DeviceUploader for LoggingUploader {
    fn upload(
        &mut self,
        id: MeshId,
        layout: VertexLayout,
        vertices: &[u8],
        indices: &[u32],
    ) -> anyhow::Result<()> {
        let bytes = vertices.len() + indices.len() * std::mem::size_of::<u32>();
        info!(
            self.log,
            "copy mesh {}: {} bytes, stride {} ({:?})",
            id,
            bytes,
            layout.stride(),
            layout.attributes()
        );
        self.resident.insert(id, bytes);
        Ok(())
    }

    fn release(&mut self, id: MeshId) {
        if let Some(bytes) = self.resident.remove(&id) {
            info!(self.log, "free mesh {}: {} bytes", id, bytes);
        }
    }
}

fn run(log: &slog::Logger, subdivisions: usize, options: &SyncOptions) -> anyhow::Result<()> {
    let ids = IdGenerator::global();
    let mut uploader = LoggingUploader::new(log);
    let mut meshes: Vec<Mesh> = vec![
        procedural::cube(ids).into(),
        procedural::plane(ids, subdivisions, subdivisions).into(),
    ];

    for mesh in meshes.iter_mut() {
        let outcome = upload::sync(log, &mut uploader, mesh, options)?;
        info!(log, "{:?} {}", outcome, mesh);
    }

    let cube = &mut meshes[0];
    cube.transform_mut()
        .set_translation(glm::vec3(0.0, 2.0, 0.0));
    cube.transform_mut()
        .rotate_axis_angle(&glm::vec3(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_4);
    info!(log, "baking {}", cube.transform());
    cube.bake_transform();

    for mesh in meshes.iter_mut() {
        let outcome = upload::sync(log, &mut uploader, mesh, options)?;
        info!(log, "{:?} {}", outcome, mesh);
    }

    for mesh in meshes.iter_mut() {
        upload::release(log, &mut uploader, mesh);
    }
    debug!(log, "{} bytes still resident", uploader.resident_bytes());

    Ok(())
}

fn main() {
    let matches = clap_app!(drawinfo_rs =>
        (version: "0.1")
        (about: "Builds procedural meshes and walks them through upload and bake")
        (@arg subdivisions: -s --subdivisions default_value("4") validator(subdivisions_legal) "Grid size of the demo plane")
        (@arg no_validate: --("no-validate") "Skip length and index checks before upload")
        (@arg verbose: -v --verbose "Print trace information")
    )
    .get_matches();

    let level = if matches.is_present("verbose") {
        slog::Level::Trace
    } else {
        slog::Level::Info
    };
    let log = slog::Logger::root(new_drain(level), o!());

    let subdivisions = value_t!(matches, "subdivisions", usize).unwrap_or_else(|e| e.exit());
    let options = SyncOptions::new().validate(!matches.is_present("no_validate"));

    if let Err(e) = run(&log, subdivisions, &options) {
        crit!(log, "{:#}", e);
        drop(log);
        std::process::exit(1);
    }
}
