// main.rs
//
// Writes every catalog part with its default parameters to stl/, or builds
// one part:
//
//     partforge <family> [params.json] [out.stl]

use partforge::catalog::Family;
use partforge::params::{ParamMap, params_from_json};
use partforge::{ModelBuilder, Mesh};
use std::error::Error;
use std::{env, fs};

fn write_stl(mesh: &Mesh, path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = mesh.to_stl_binary()?;
    fs::write(path, &bytes)?;
    println!("{path}: {} triangles, {} bytes", (bytes.len() - 84) / 50, bytes.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let builder = ModelBuilder::global();
    println!("boolean backend: {}", builder.backend().name());

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(family) = args.first() else {
        // Ensure the /stl folder exists
        fs::create_dir_all("stl")?;
        for family in Family::ALL {
            let mesh = builder.build(family.slug(), &ParamMap::new())?;
            write_stl(&mesh, &format!("stl/{family}.stl"))?;
        }
        return Ok(());
    };

    let params = match args.get(1) {
        Some(path) => params_from_json(&fs::read_to_string(path)?)?,
        None => ParamMap::new(),
    };
    let family: Family = family.parse()?;
    let out = args.get(2).cloned().unwrap_or_else(|| format!("{family}.stl"));

    let mesh = builder.build(family.slug(), &params)?;
    write_stl(&mesh, &out)
}
