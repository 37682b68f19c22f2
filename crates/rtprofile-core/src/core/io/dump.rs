use crate::core::models::atom::AtomRecord;
use crate::core::models::frame::{BoxExtent, Frame, TrajectoryHeader};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

pub const NUMBER_OF_ATOMS_MARKER: &str = "ITEM: NUMBER OF ATOMS";
pub const BOX_BOUNDS_MARKER: &str = "ITEM: BOX BOUNDS";
pub const ATOMS_MARKER: &str = "ITEM: ATOMS id type xs ys zs";

const AXES: [&str; 3] = ["x", "y", "z"];
const ATOM_FIELDS: [&str; 5] = ["id", "type", "xs", "ys", "zs"];

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Marker '{marker}' not found before end of input")]
    MissingMarker { marker: &'static str },
    #[error("Unexpected end of input after line {line} while reading {context}")]
    UnexpectedEof { line: usize, context: &'static str },
    #[error("Atom block truncated: expected {expected} atom lines, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("Box extent {value} on line {line} ({axis} axis) must be finite and positive")]
    InvalidExtent {
        line: usize,
        axis: &'static str,
        value: f64,
    },
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: DumpParseErrorKind },
}

#[derive(Debug, Error, PartialEq)]
pub enum DumpParseErrorKind {
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid number for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("Expected exactly {expected} fields, found {found}")]
    ExtraFields { expected: usize, found: usize },
}

/// Sequential reader over a LAMMPS text dump.
///
/// The format has no frame offsets, so header scanning and atom extraction share this one
/// cursor: every call resumes where the previous one stopped.
pub struct DumpReader<R> {
    reader: R,
    buf: String,
    line_number: usize,
    frames_read: usize,
}

impl DumpReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_number: 0,
            frames_read: 0,
        }
    }

    /// Number of the last line consumed (1-based, 0 before any read).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Number of complete frames returned so far; also the index of the next frame.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    fn advance(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        let len = self.buf.trim_end_matches(['\n', '\r']).len();
        self.buf.truncate(len);
        Ok(true)
    }

    fn require_line(&mut self, context: &'static str) -> Result<(), DumpError> {
        if self.advance()? {
            Ok(())
        } else {
            Err(DumpError::UnexpectedEof {
                line: self.line_number,
                context,
            })
        }
    }

    /// Advances until a line containing `marker` has been consumed.
    ///
    /// Returns `Ok(false)` when the input ends first.
    pub fn scan_to(&mut self, marker: &str) -> io::Result<bool> {
        while self.advance()? {
            if self.buf.contains(marker) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn read_atom_count(&mut self) -> Result<usize, DumpError> {
        if !self.scan_to(NUMBER_OF_ATOMS_MARKER)? {
            return Err(DumpError::MissingMarker {
                marker: NUMBER_OF_ATOMS_MARKER,
            });
        }
        self.require_line("atom count")?;
        let value = self.buf.trim();
        value.parse::<usize>().map_err(|_| DumpError::Parse {
            line: self.line_number,
            kind: DumpParseErrorKind::InvalidInt {
                field: "atom count",
                value: value.to_string(),
            },
        })
    }

    pub fn read_box_extent(&mut self) -> Result<BoxExtent, DumpError> {
        if !self.scan_to(BOX_BOUNDS_MARKER)? {
            return Err(DumpError::MissingMarker {
                marker: BOX_BOUNDS_MARKER,
            });
        }
        let mut upper = [0.0; 3];
        for (axis, slot) in AXES.iter().zip(upper.iter_mut()) {
            self.require_line("box bounds")?;
            let (lo, hi) = parse_bounds(&self.buf, self.line_number, *axis)?;
            if !hi.is_finite() || hi <= 0.0 {
                return Err(DumpError::InvalidExtent {
                    line: self.line_number,
                    axis: *axis,
                    value: hi,
                });
            }
            if lo != 0.0 {
                warn!(
                    "Box lower bound {} on the {} axis is ignored; extent is taken as {}.",
                    lo, axis, hi
                );
            }
            *slot = hi;
        }
        Ok(BoxExtent::new(upper[0], upper[1], upper[2]))
    }

    /// Reads the atom count and box extents of the first frame.
    pub fn read_header(&mut self) -> Result<TrajectoryHeader, DumpError> {
        let num_atoms = self.read_atom_count()?;
        let extent = self.read_box_extent()?;
        debug!(
            "Trajectory header: {} atoms, box {} x {} x {}",
            num_atoms, extent.lx, extent.ly, extent.lz
        );
        Ok(TrajectoryHeader { num_atoms, extent })
    }

    /// Extracts the next frame, keeping only atoms of `species`.
    ///
    /// Returns `Ok(None)` when no further `ITEM: ATOMS` marker exists. Once a marker is found,
    /// the block must hold `header.num_atoms` lines.
    pub fn next_frame(
        &mut self,
        header: &TrajectoryHeader,
        species: u32,
    ) -> Result<Option<Frame>, DumpError> {
        if !self.scan_to(ATOMS_MARKER)? {
            return Ok(None);
        }

        let mut points = Vec::new();
        for found in 0..header.num_atoms {
            if !self.advance()? {
                return Err(DumpError::Truncated {
                    expected: header.num_atoms,
                    found,
                });
            }
            let atom = parse_atom_line(&self.buf, self.line_number)?;
            if atom.is_species(species) {
                points.push(atom.physical_position(&header.extent));
            }
        }

        let frame = Frame::new(self.frames_read, points);
        self.frames_read += 1;
        Ok(Some(frame))
    }
}

fn parse_number(token: &str, line: usize, field: &'static str) -> Result<f64, DumpError> {
    token.parse::<f64>().map_err(|_| DumpError::Parse {
        line,
        kind: DumpParseErrorKind::InvalidFloat {
            field,
            value: token.to_string(),
        },
    })
}

fn parse_integral(token: &str, line: usize, field: &'static str) -> Result<u64, DumpError> {
    let value = parse_number(token, line, field)?;
    if value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(DumpError::Parse {
            line,
            kind: DumpParseErrorKind::InvalidInt {
                field,
                value: token.to_string(),
            },
        });
    }
    Ok(value as u64)
}

fn parse_bounds(line_str: &str, line: usize, axis: &'static str) -> Result<(f64, f64), DumpError> {
    let tokens: Vec<&str> = line_str.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(DumpError::Parse {
            line,
            kind: DumpParseErrorKind::MissingFields {
                expected: 2,
                found: tokens.len(),
            },
        });
    }
    let lo = parse_number(tokens[0], line, axis)?;
    let hi = parse_number(tokens[1], line, axis)?;
    Ok((lo, hi))
}

/// Parses an `id type xs ys zs` line. Id and type are read as numbers and must be whole.
pub fn parse_atom_line(line_str: &str, line: usize) -> Result<AtomRecord, DumpError> {
    let tokens: Vec<&str> = line_str.split_whitespace().collect();
    if tokens.len() < ATOM_FIELDS.len() {
        return Err(DumpError::Parse {
            line,
            kind: DumpParseErrorKind::MissingFields {
                expected: ATOM_FIELDS.len(),
                found: tokens.len(),
            },
        });
    }
    if tokens.len() > ATOM_FIELDS.len() {
        return Err(DumpError::Parse {
            line,
            kind: DumpParseErrorKind::ExtraFields {
                expected: ATOM_FIELDS.len(),
                found: tokens.len(),
            },
        });
    }

    let id = parse_integral(tokens[0], line, ATOM_FIELDS[0])?;
    let type_id = parse_integral(tokens[1], line, ATOM_FIELDS[1])?;
    let type_id = u32::try_from(type_id).map_err(|_| DumpError::Parse {
        line,
        kind: DumpParseErrorKind::InvalidInt {
            field: ATOM_FIELDS[1],
            value: tokens[1].to_string(),
        },
    })?;
    let xs = parse_number(tokens[2], line, ATOM_FIELDS[2])?;
    let ys = parse_number(tokens[3], line, ATOM_FIELDS[3])?;
    let zs = parse_number(tokens[4], line, ATOM_FIELDS[4])?;

    Ok(AtomRecord::new(id, type_id, Point3::new(xs, ys, zs)))
}
