//! Hand-built big-endian fixtures for the integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

pub const MAGIC: [u8; 4] = [0xAC, 0xED, 0x00, 0x05];

/// Big-endian byte builder.
#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, v: bool) -> Self {
        self.0.push(u8::from(v));
        self
    }

    pub fn short(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn int(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn float(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn double(mut self, v: f64) -> Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn doubles(self, n: usize, v: f64) -> Self {
        (0..n).fold(self, |b, _| b.double(v))
    }

    pub fn floats(self, n: usize, v: f32) -> Self {
        (0..n).fold(self, |b, _| b.float(v))
    }

    pub fn ints(self, n: usize, v: i32) -> Self {
        (0..n).fold(self, |b, _| b.int(v))
    }

    pub fn flags(self, n: usize, v: bool) -> Self {
        (0..n).fold(self, |b, _| b.flag(v))
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

/// Substrate record with the given header values and a diameter of 400.
pub fn substrate(version: i32, cell_count: i32, cell_type_count: i32) -> Vec<u8> {
    Bytes::new()
        .int(version)
        .double(12.5) // substrate_age
        .int(cell_count)
        .int(3) // environment_version
        .doubles(7, 0.25)
        .int(cell_type_count)
        .flags(usize::try_from(cell_type_count + 1).unwrap_or(0), true)
        .double(0.1) // gravity
        .double(1.0) // density
        .double(0.0) // density_gradient
        .flag(false) // kill_cells_at_edge
        .double(0.5) // nitrates
        .int(1000) // max_cell_count
        .int(2000) // max_food_count
        .double(400.0) // substrate_diameter
        .double(0.2) // dynamic_friction
        .double(0.3) // static_friction
        .flag(true) // only_point_mutations
        .float(0.5) // salinity
        .flag(false) // cell_aging
        .double(0.0) // nutrient_lumpiness
        .double(0.0) // nutrient_lump_size
        .flag(true) // mobile_food
        .float(0.25) // nutrient_coating
        .build()
}

pub fn link(target: i32) -> Vec<u8> {
    Bytes::new()
        .int(target)
        .double(0.5)
        .double(1.5)
        .flag(true)
        .doubles(2, 0.0)
        .float(0.75)
        .float(0.02)
        .build()
}

pub fn gene(version: i32, cell_type: i32, max_connections: i32) -> Vec<u8> {
    let mut b = Bytes::new()
        .int(version)
        .floats(9, 0.5)
        .ints(2, 1)
        .flags(3, true)
        .int(cell_type)
        .int(4)
        .flags(4, false)
        .float(0.6);
    for i in 0..12i16 {
        b = b.short(i).short(i + 1).floats(3, 0.125);
    }
    for i in 0..12 {
        b = b.int(if i == 5 { max_connections } else { i });
    }
    b.float(0.3).float(0.0).build()
}

pub fn cell(version: i32, links: &[Vec<u8>], genes: &[Vec<u8>]) -> Vec<u8> {
    let mut b = Bytes::new()
        .int(version)
        .double(10.0)
        .double(20.0)
        .double(4.0) // velocity_x
        .double(-4.0) // velocity_y
        .doubles(7, 0.0)
        .int(i32::try_from(links.len()).unwrap());
    for l in links {
        b = b.raw(l);
    }
    b = b
        .int(0) // mode
        .flag(false)
        .floats(3, 1.0)
        .int(i32::try_from(genes.len()).unwrap());
    for g in genes {
        b = b.raw(g);
    }
    b.int(42) // cell_id
        .int(-1) // parent_id
        .int(0)
        .doubles(4, 0.0)
        .flag(false)
        .floats(14, 0.0)
        .ints(2, 0)
        .double(0.0)
        .build()
}

pub fn food(x: f32) -> Vec<u8> {
    Bytes::new()
        .float(x)
        .float(2.0)
        .float(1.0)
        .float(0.0)
        .float(0.0)
        .float(0.5)
        .build()
}

pub fn genome(light_angle: f64, cells: &[Vec<u8>], food_count: i32, foods: &[Vec<u8>]) -> Vec<u8> {
    let mut b = Bytes::new().double(light_angle);
    for c in cells {
        b = b.raw(c);
    }
    b = b.int(food_count);
    for f in foods {
        b = b.raw(f);
    }
    b.build()
}

/// Wrap a payload in magic + block framing, 1024-byte blocks.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    for chunk in payload.chunks(1024) {
        if chunk.len() <= 255 {
            out.push(0x77);
            out.push(u8::try_from(chunk.len()).unwrap());
        } else {
            out.push(0x7A);
            out.extend_from_slice(&u32::try_from(chunk.len()).unwrap().to_be_bytes());
        }
        out.extend_from_slice(chunk);
    }
    out
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A complete save file: framed substrate + gzip(framed genome).
pub fn save_file(substrate: &[u8], genome: &[u8]) -> Vec<u8> {
    let mut out = frame(substrate);
    out.extend(gzip(&frame(genome)));
    out
}

/// Two cells with one link and one gene each, one food particle.
pub fn small_world() -> Vec<u8> {
    let cells = [
        cell(95, &[link(1)], &[gene(95, 2, 20)]),
        cell(95, &[link(0)], &[gene(95, 0, 7)]),
    ];
    save_file(&substrate(95, 2, 17), &genome(1.25, &cells, 1, &[food(3.0)]))
}
