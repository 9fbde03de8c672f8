// src/data.rs
// Static tables for the material catalog: base elements, the predefined
// (NIST-style) materials, the recipes for the scintillator cocktail and
// the epoxy, and the bundled optical data. Doc comments summarise each
// table; the literals are the canonical values.

use crate::units::{EV, G_PER_CM3, M, MM, NS, PER_CENT};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Base element record: symbol, atomic number, molar mass in g/mol.
pub static ELEMENTS: Lazy<HashMap<&'static str, (u32, f64)>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("H", (1, 1.008));
    m.insert("B", (5, 10.81));
    m.insert("C", (6, 12.011));
    m.insert("N", (7, 14.007));
    m.insert("O", (8, 15.999));
    m.insert("Na", (11, 22.990));
    m.insert("Al", (13, 26.982));
    m.insert("Si", (14, 28.085));
    m.insert("Ar", (18, 39.948));
    m.insert("K", (19, 39.098));
    m.insert("Cr", (24, 51.996));
    m.insert("Fe", (26, 55.845));
    m.insert("Co", (27, 58.933));
    m.insert("Ni", (28, 58.693));
    m
});

/// Elements the catalog resolves up front; the custom organic materials are
/// built directly from these.
pub const BASE_ELEMENTS: [&str; 4] = ["H", "C", "N", "O"];

/// How a material is assembled from its constituents.
#[derive(Debug, Clone, Copy)]
pub enum Recipe {
    /// Element symbols with mass fractions.
    MassFractions(&'static [(&'static str, f64)]),
    /// Element symbols with atom counts per formula unit.
    AtomCounts(&'static [(&'static str, u32)]),
    /// Named sub-materials with mass fractions.
    Blend(&'static [(&'static str, f64)]),
}

/// Density (g/cm3) and recipe for every material the database can build.
pub static MATERIAL_RECIPES: Lazy<HashMap<&'static str, (f64, Recipe)>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // Predefined materials
    m.insert(
        "G4_AIR",
        (
            0.001_204_79 * G_PER_CM3,
            Recipe::MassFractions(&[
                ("C", 0.000124),
                ("N", 0.755268),
                ("O", 0.231781),
                ("Ar", 0.012827),
            ]),
        ),
    );
    m.insert(
        "G4_Galactic",
        (1.0e-25 * G_PER_CM3, Recipe::MassFractions(&[("H", 1.0)])),
    );
    m.insert("G4_Co", (8.9 * G_PER_CM3, Recipe::MassFractions(&[("Co", 1.0)])));
    m.insert(
        "G4_Pyrex_Glass",
        (
            2.23 * G_PER_CM3,
            Recipe::MassFractions(&[
                ("B", 0.040064),
                ("O", 0.539562),
                ("Na", 0.028191),
                ("Al", 0.011644),
                ("Si", 0.377220),
                ("K", 0.003321),
            ]),
        ),
    );
    m.insert(
        "G4_STAINLESS-STEEL",
        (
            8.0 * G_PER_CM3,
            Recipe::AtomCounts(&[("Fe", 74), ("Cr", 18), ("Ni", 9)]),
        ),
    );
    m.insert(
        "G4_SILICON_DIOXIDE",
        (
            2.32 * G_PER_CM3,
            Recipe::AtomCounts(&[("Si", 1), ("O", 2)]),
        ),
    );

    // Liquid scintillator: LAB solvent, PPO fluor, bis-MSB wavelength shifter
    m.insert(
        "LAB",
        (0.86 * G_PER_CM3, Recipe::AtomCounts(&[("C", 18), ("H", 30)])),
    );
    m.insert(
        "PPO",
        (
            1.1 * G_PER_CM3,
            Recipe::AtomCounts(&[("C", 15), ("H", 11), ("N", 1), ("O", 1)]),
        ),
    );
    m.insert(
        "bisMSB",
        (1.05 * G_PER_CM3, Recipe::AtomCounts(&[("C", 24), ("H", 22)])),
    );
    m.insert(
        "LS",
        (
            0.863 * G_PER_CM3,
            Recipe::Blend(&[
                ("LAB", 99.64 * PER_CENT),
                ("PPO", 0.35 * PER_CENT),
                ("bisMSB", 0.01 * PER_CENT),
            ]),
        ),
    );

    // Bisphenol-A epoxy encapsulating the source
    m.insert(
        "Epoxy",
        (
            1.16 * G_PER_CM3,
            Recipe::AtomCounts(&[("C", 11), ("H", 12), ("O", 3)]),
        ),
    );
    m
});

/// Photon energies shared by every optical property table.
pub const PHOTON_ENERGIES: [f64; 12] = [
    2.38 * EV,
    2.48 * EV,
    2.58 * EV,
    2.70 * EV,
    2.76 * EV,
    2.82 * EV,
    2.92 * EV,
    2.95 * EV,
    3.02 * EV,
    3.10 * EV,
    3.26 * EV,
    3.44 * EV,
];

pub const RINDEX_AIR: f64 = 1.0;
pub const RINDEX_GLASS: f64 = 1.47;
pub const RINDEX_SCINTILLATOR: f64 = 1.5;
pub const RINDEX_COUPLING: f64 = 1.45;

/// Scintillator attenuation length on [`PHOTON_ENERGIES`].
pub const ABSORPTION_LENGTH_SCINTILLATOR: [f64; 12] = [
    20.0 * M,
    20.0 * M,
    20.0 * M,
    20.0 * M,
    20.0 * M,
    18.0 * M,
    15.0 * M,
    15.0 * M,
    10.0 * M,
    5.0 * M,
    2.0 * M,
    1.0 * M,
];

/// Relative scintillation emission spectrum on [`PHOTON_ENERGIES`].
pub const EMISSION_SCINTILLATOR: [f64; 12] = [
    0.05, 0.15, 0.45, 0.85, 1.00, 0.85, 0.45, 0.35, 0.20, 0.10, 0.05, 0.02,
];

/// Photons per MeV of deposited energy.
pub const SCINTILLATION_YIELD: f64 = 10000.0 / crate::units::MEV;
pub const SCINTILLATION_DECAY_TIME: f64 = 10.0 * NS;
pub const RESOLUTION_SCALE: f64 = 1.0;
/// Birks quenching constant.
pub const BIRKS_CONSTANT: f64 = 0.0794 * MM / crate::units::MEV;

/// Photocathode quantum-efficiency curve: photon energy -> detection probability.
pub const QE_ENERGIES: [f64; 10] = [
    1.9 * EV,
    2.1 * EV,
    2.4 * EV,
    2.7 * EV,
    2.9 * EV,
    3.1 * EV,
    3.3 * EV,
    3.5 * EV,
    3.7 * EV,
    4.1 * EV,
];
pub const QE_VALUES: [f64; 10] = [0.02, 0.08, 0.18, 0.24, 0.28, 0.26, 0.22, 0.15, 0.05, 0.01];
