//! Gmsh mesh file input.
//!
//! Supports reading Gmsh MSH format version 4.1 (ASCII) for 1D meshes.
//!
//! ## Layout
//! - `$PhysicalNames`: names of the physical groups
//! - `$Entities`: points and curves with their physical tags
//! - `$Nodes`: node coordinates, grouped in entity blocks
//! - `$Elements`: elements, grouped in entity blocks
//!
//! Each physical group of dimension 1 becomes a mesh [`Region`]; 2-node line
//! elements (type 1) on curves become mesh elements. Point elements (type 15) on
//! dimension-0 entities are skipped.
//!
//! ## Example
//! ```no_run
//! use dgtd::mesh::gmsh::{check_mesh, read_gmsh_mesh};
//! use std::path::Path;
//!
//! let path = Path::new("data/three_elements.msh");
//! check_mesh(path).expect("Malformed mesh file");
//! let mesh = read_gmsh_mesh(path).expect("Failed to read mesh");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use log::{debug, info};
use thiserror::Error;

use super::mesh1d::{Element1D, Mesh1D, Region};
use crate::error::Result;

/// Sections every mesh file must contain.
const REQUIRED_SECTIONS: [&str; 5] = [
    "MeshFormat",
    "PhysicalNames",
    "Entities",
    "Nodes",
    "Elements",
];

/// Supported MSH format version.
const SUPPORTED_VERSION: &str = "4.1";

/// Gmsh element type of a 2-node line.
const LINE_ELEMENT: i32 = 1;

/// Gmsh element type of a 1-node point.
const POINT_ELEMENT: i32 = 15;

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be opened.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File is not a `.msh` file.
    #[error("Not a Gmsh mesh file (expected .msh extension): {0}")]
    InvalidExtension(String),

    /// File has no content.
    #[error("Mesh file is empty")]
    EmptyFile,

    /// File contains blank lines.
    #[error("Mesh file contains an empty line at line {0}")]
    EmptyLine(usize),

    /// Invalid file format.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unsupported mesh format version.
    #[error("Unsupported Gmsh version: {0} (only 4.1 is supported)")]
    UnsupportedVersion(String),

    /// Unsupported element type.
    #[error("Unsupported element type: {0}")]
    UnsupportedElement(i32),

    /// Missing required section.
    #[error("Missing section: {0}")]
    MissingSection(String),

    /// Section without an end marker.
    #[error("Section {0} is not closed by $End{0}")]
    UnterminatedSection(String),

    /// Section without content.
    #[error("Section {0} is empty")]
    EmptySection(String),

    /// Node blocks with parametric coordinates.
    #[error("Parametric nodes are not supported (entity {0})")]
    ParametricNodes(usize),
}

/// A `$Name ... $EndName` block of the file.
struct Section {
    name: String,
    lines: Vec<String>,
}

/// Check the structure of a mesh file without building the mesh.
///
/// Verifies the `.msh` extension, that the file is non-empty without blank
/// lines, that every section is closed and has content, that all required
/// sections are present and that the format version is 4.1.
pub fn check_mesh(path: &Path) -> std::result::Result<(), GmshError> {
    if path.extension().and_then(|e| e.to_str()) != Some("msh") {
        return Err(GmshError::InvalidExtension(path.display().to_string()));
    }
    let lines = read_lines(path)?;
    check_lines(&lines)
}

/// Read a Gmsh MSH file (format 4.1) into a [`Mesh1D`].
///
/// The structural checks of [`check_mesh`] are applied to the content first.
///
/// # Returns
/// * `Ok(Mesh1D)` - The parsed mesh
/// * `Err(DgError)` - If reading, parsing or mesh validation fails
pub fn read_gmsh_mesh(path: &Path) -> Result<Mesh1D> {
    let lines = read_lines(path)?;
    let mesh = parse_mesh(&lines)?;
    info!(
        "Read mesh {}: {} elements in {} region(s)",
        path.display(),
        mesh.n_elements(),
        mesh.regions().len()
    );
    Ok(mesh)
}

/// Parse the content of a Gmsh MSH 4.1 file into a [`Mesh1D`].
pub fn parse_gmsh_str(content: &str) -> Result<Mesh1D> {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    parse_mesh(&lines)
}

fn read_lines(path: &Path) -> std::result::Result<Vec<String>, GmshError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    // A trailing newline at the end of file is not an empty line
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

fn check_lines(lines: &[String]) -> std::result::Result<(), GmshError> {
    if lines.is_empty() {
        return Err(GmshError::EmptyFile);
    }
    if let Some(i) = lines.iter().position(|l| l.trim().is_empty()) {
        return Err(GmshError::EmptyLine(i + 1));
    }

    let sections = split_sections(lines)?;
    for required in REQUIRED_SECTIONS {
        if !sections.iter().any(|s| s.name == required) {
            return Err(GmshError::MissingSection(required.to_string()));
        }
    }
    for section in &sections {
        if section.lines.is_empty() {
            return Err(GmshError::EmptySection(section.name.clone()));
        }
    }

    let format = find_section(&sections, "MeshFormat")?;
    parse_mesh_format(format)
}

fn split_sections(lines: &[String]) -> std::result::Result<Vec<Section>, GmshError> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in lines {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("$End") {
            match current.take() {
                Some(section) if section.name == name => sections.push(section),
                Some(section) => return Err(GmshError::UnterminatedSection(section.name)),
                None => {
                    return Err(GmshError::ParseError(format!(
                        "${} without matching ${}",
                        line.trim_start_matches('$'),
                        name
                    )));
                }
            }
        } else if let Some(name) = line.strip_prefix('$') {
            if let Some(section) = current.take() {
                return Err(GmshError::UnterminatedSection(section.name));
            }
            current = Some(Section {
                name: name.to_string(),
                lines: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.lines.push(line.to_string());
        }
        // Content outside sections is ignored
    }

    if let Some(section) = current {
        return Err(GmshError::UnterminatedSection(section.name));
    }
    Ok(sections)
}

fn find_section<'a>(
    sections: &'a [Section],
    name: &str,
) -> std::result::Result<&'a Section, GmshError> {
    sections
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| GmshError::MissingSection(name.to_string()))
}

fn parse_mesh(lines: &[String]) -> Result<Mesh1D> {
    check_lines(lines)?;
    let sections = split_sections(lines)?;

    let names = parse_physical_names(find_section(&sections, "PhysicalNames")?)?;
    let curves = parse_entities(find_section(&sections, "Entities")?)?;
    let nodes = parse_nodes(find_section(&sections, "Nodes")?)?;
    let lines = parse_elements(find_section(&sections, "Elements")?)?;

    debug!(
        "Gmsh file: {} physical names, {} curves, {} nodes, {} line elements",
        names.len(),
        curves.len(),
        nodes.len(),
        lines.len()
    );

    let mut regions: Vec<Region> = Vec::new();
    let mut elements = Vec::with_capacity(lines.len());

    for line in lines {
        let physical = curves
            .get(&line.entity)
            .and_then(|tags| tags.first().copied())
            .ok_or_else(|| {
                GmshError::ParseError(format!(
                    "curve {} of element {} has no physical group",
                    line.entity, line.tag
                ))
            })?;

        if !regions.iter().any(|r| r.tag == physical) {
            let name = names.get(&(1, physical)).cloned().unwrap_or_default();
            regions.push(Region {
                tag: physical,
                name,
            });
        }

        let coord = |node: usize| {
            nodes.get(&node).copied().ok_or_else(|| {
                GmshError::ParseError(format!(
                    "element {} references unknown node {}",
                    line.tag, node
                ))
            })
        };
        let a = coord(line.nodes[0])?;
        let b = coord(line.nodes[1])?;
        elements.push(Element1D::new(line.tag, a, b, physical));
    }

    if elements.is_empty() {
        return Err(GmshError::MissingSection("Elements (lines)".to_string()).into());
    }

    Mesh1D::from_elements(elements, regions)
}

/// Parse the $MeshFormat section.
fn parse_mesh_format(section: &Section) -> std::result::Result<(), GmshError> {
    let line = section
        .lines
        .first()
        .ok_or_else(|| GmshError::EmptySection(section.name.clone()))?;
    let mut parts = line.split_whitespace();

    let version = parts
        .next()
        .ok_or_else(|| GmshError::ParseError("Empty MeshFormat line".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(GmshError::UnsupportedVersion(version.to_string()));
    }

    let file_type: i32 = next_token(&mut parts, "file type")?;
    if file_type != 0 {
        return Err(GmshError::ParseError(
            "binary MSH files are not supported".to_string(),
        ));
    }
    Ok(())
}

/// Parse the $PhysicalNames section into (dimension, tag) -> name.
fn parse_physical_names(
    section: &Section,
) -> std::result::Result<HashMap<(usize, usize), String>, GmshError> {
    let mut lines = section.lines.iter();
    let count: usize = parse_line(lines.next(), "physical name count")?;

    let mut names = HashMap::with_capacity(count);
    for _ in 0..count {
        let line = lines
            .next()
            .ok_or_else(|| GmshError::ParseError("Missing physical name".to_string()))?;
        let mut parts = line.split_whitespace();
        let dim: usize = next_token(&mut parts, "physical dimension")?;
        let tag: usize = next_token(&mut parts, "physical tag")?;
        let name = parts.collect::<Vec<_>>().join(" ");
        names.insert((dim, tag), name.trim_matches('"').to_string());
    }
    Ok(names)
}

/// Parse the $Entities section into curve tag -> physical tags.
fn parse_entities(
    section: &Section,
) -> std::result::Result<HashMap<usize, Vec<usize>>, GmshError> {
    let mut lines = section.lines.iter();
    let header = lines
        .next()
        .ok_or_else(|| GmshError::ParseError("Missing entity counts".to_string()))?;
    let mut parts = header.split_whitespace();
    let n_points: usize = next_token(&mut parts, "point count")?;
    let n_curves: usize = next_token(&mut parts, "curve count")?;

    // Format: pointTag X Y Z numPhysicalTags physicalTag ...
    for _ in 0..n_points {
        lines
            .next()
            .ok_or_else(|| GmshError::ParseError("Missing point entity".to_string()))?;
    }

    // Format: curveTag minX minY minZ maxX maxY maxZ numPhysicalTags physicalTag ...
    //         numBoundingPoints pointTag ...
    let mut curves = HashMap::with_capacity(n_curves);
    for _ in 0..n_curves {
        let line = lines
            .next()
            .ok_or_else(|| GmshError::ParseError("Missing curve entity".to_string()))?;
        let mut parts = line.split_whitespace();
        let tag: usize = next_token(&mut parts, "curve tag")?;
        for _ in 0..6 {
            let _: f64 = next_token(&mut parts, "curve bounding box")?;
        }
        let n_physical: usize = next_token(&mut parts, "curve physical tag count")?;
        // Physical tags may carry an orientation sign
        let physical = (0..n_physical)
            .map(|_| {
                next_token::<i64>(&mut parts, "curve physical tag")
                    .map(|t| t.unsigned_abs() as usize)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        curves.insert(tag, physical);
    }
    Ok(curves)
}

/// Parse the $Nodes section into node tag -> x coordinate.
fn parse_nodes(section: &Section) -> std::result::Result<HashMap<usize, f64>, GmshError> {
    let mut lines = section.lines.iter();
    let header = lines
        .next()
        .ok_or_else(|| GmshError::ParseError("Missing node counts".to_string()))?;
    let mut parts = header.split_whitespace();
    let n_blocks: usize = next_token(&mut parts, "node block count")?;
    let n_nodes: usize = next_token(&mut parts, "node count")?;

    let mut nodes = HashMap::with_capacity(n_nodes);
    for _ in 0..n_blocks {
        let line = lines
            .next()
            .ok_or_else(|| GmshError::ParseError("Missing node block header".to_string()))?;
        let mut parts = line.split_whitespace();
        let _dim: usize = next_token(&mut parts, "entity dimension")?;
        let entity: usize = next_token(&mut parts, "entity tag")?;
        let parametric: usize = next_token(&mut parts, "parametric flag")?;
        let count: usize = next_token(&mut parts, "nodes in block")?;
        if parametric != 0 {
            return Err(GmshError::ParametricNodes(entity));
        }

        let mut tags = Vec::with_capacity(count);
        for _ in 0..count {
            tags.push(parse_line::<usize>(lines.next(), "node tag")?);
        }
        for tag in tags {
            let line = lines.next().ok_or_else(|| {
                GmshError::ParseError(format!("Missing coordinates of node {}", tag))
            })?;
            let mut parts = line.split_whitespace();
            let x: f64 = next_token(&mut parts, "x coordinate")?;
            nodes.insert(tag, x);
        }
    }

    if nodes.len() != n_nodes {
        return Err(GmshError::ParseError(format!(
            "expected {} nodes, found {}",
            n_nodes,
            nodes.len()
        )));
    }
    Ok(nodes)
}

/// A 2-node line element as listed in the file.
struct LineElement {
    tag: usize,
    entity: usize,
    nodes: [usize; 2],
}

/// Parse the $Elements section, keeping line elements on curves.
fn parse_elements(section: &Section) -> std::result::Result<Vec<LineElement>, GmshError> {
    let mut lines = section.lines.iter();
    let header = lines
        .next()
        .ok_or_else(|| GmshError::ParseError("Missing element counts".to_string()))?;
    let mut parts = header.split_whitespace();
    let n_blocks: usize = next_token(&mut parts, "element block count")?;
    let n_elements: usize = next_token(&mut parts, "element count")?;

    let mut elements = Vec::with_capacity(n_elements);
    for _ in 0..n_blocks {
        let line = lines
            .next()
            .ok_or_else(|| GmshError::ParseError("Missing element block header".to_string()))?;
        let mut parts = line.split_whitespace();
        let dim: usize = next_token(&mut parts, "entity dimension")?;
        let entity: usize = next_token(&mut parts, "entity tag")?;
        let element_type: i32 = next_token(&mut parts, "element type")?;
        let count: usize = next_token(&mut parts, "elements in block")?;

        match (dim, element_type) {
            (0, POINT_ELEMENT) => {
                for _ in 0..count {
                    lines.next();
                }
            }
            (1, LINE_ELEMENT) => {
                for _ in 0..count {
                    let line = lines
                        .next()
                        .ok_or_else(|| GmshError::ParseError("Missing line element".to_string()))?;
                    let mut parts = line.split_whitespace();
                    let tag: usize = next_token(&mut parts, "element tag")?;
                    let n0: usize = next_token(&mut parts, "element node")?;
                    let n1: usize = next_token(&mut parts, "element node")?;
                    elements.push(LineElement {
                        tag,
                        entity,
                        nodes: [n0, n1],
                    });
                }
            }
            (_, other) => return Err(GmshError::UnsupportedElement(other)),
        }
    }
    Ok(elements)
}

fn next_token<T: FromStr>(
    parts: &mut SplitWhitespace<'_>,
    what: &str,
) -> std::result::Result<T, GmshError> {
    let token = parts
        .next()
        .ok_or_else(|| GmshError::ParseError(format!("Missing {}", what)))?;
    token
        .parse()
        .map_err(|_| GmshError::ParseError(format!("Invalid {}: {}", what, token)))
}

fn parse_line<T: FromStr>(
    line: Option<&String>,
    what: &str,
) -> std::result::Result<T, GmshError> {
    let line = line.ok_or_else(|| GmshError::ParseError(format!("Missing {}", what)))?;
    next_token(&mut line.split_whitespace(), what)
}
