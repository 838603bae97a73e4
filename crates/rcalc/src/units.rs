//! Unit catalog.
//!
//! Units are grouped into families. Each unit maps onto its family's base
//! unit by `base = value * scale + offset`, so converting between two units
//! of one family always goes through the base. Only families without an
//! offset convert vectors, component by component.
//!
//! Unit names are case-sensitive and unique across families. On the stack a
//! unit is written with a leading underscore: `_km`.

use crate::value::TypeSet;

/// One unit of a family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitDef {
    pub name: &'static str,
    pub description: &'static str,
    scale: f64,
    offset: f64,
}

impl UnitDef {
    const fn linear(name: &'static str, description: &'static str, scale: f64) -> Self {
        Self {
            name,
            description,
            scale,
            offset: 0.0,
        }
    }

    const fn affine(
        name: &'static str,
        description: &'static str,
        scale: f64,
        offset: f64,
    ) -> Self {
        Self {
            name,
            description,
            scale,
            offset,
        }
    }

    /// How the unit is written as a literal.
    pub fn usage(&self) -> String {
        format!("_{}", self.name)
    }

    pub fn to_base(&self, x: f64) -> f64 {
        x * self.scale + self.offset
    }

    pub fn from_base(&self, x: f64) -> f64 {
        (x - self.offset) / self.scale
    }

    /// Factor taking a value in `self` to a value in `to`, if both are linear.
    pub fn factor_to(&self, to: &UnitDef) -> Option<f64> {
        (self.offset == 0.0 && to.offset == 0.0).then(|| self.scale / to.scale)
    }
}

/// A group of mutually convertible units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitFamily {
    pub name: &'static str,
    /// Value types the family converts.
    pub base_type: TypeSet,
    /// The unit with scale 1 and no offset. Always `units[0]`.
    pub units: &'static [UnitDef],
}

impl UnitFamily {
    pub fn base(&self) -> &'static UnitDef {
        let units: &'static [UnitDef] = self.units;
        &units[0]
    }

    pub fn find(&self, name: &str) -> Option<&'static UnitDef> {
        let units: &'static [UnitDef] = self.units;
        units.iter().find(|u| u.name == name)
    }
}

const LINEAR: TypeSet = TypeSet::SCALAR.union(TypeSet::VECTOR);

// Alphabetical by family name.
const FAMILIES: &[UnitFamily] = &[
    UnitFamily {
        name: "Angle",
        base_type: LINEAR,
        units: &[
            UnitDef::linear("rad", "radian", 1.0),
            UnitDef::linear("deg", "degree", std::f64::consts::PI / 180.0),
            UnitDef::linear("grad", "gradian", std::f64::consts::PI / 200.0),
            UnitDef::linear("turn", "full turn", std::f64::consts::TAU),
        ],
    },
    UnitFamily {
        name: "Data",
        base_type: LINEAR,
        units: &[
            UnitDef::linear("B", "byte", 1.0),
            UnitDef::linear("bit", "bit", 0.125),
            UnitDef::linear("KB", "kilobyte", 1e3),
            UnitDef::linear("MB", "megabyte", 1e6),
            UnitDef::linear("GB", "gigabyte", 1e9),
            UnitDef::linear("KiB", "kibibyte", 1024.0),
            UnitDef::linear("MiB", "mebibyte", 1_048_576.0),
            UnitDef::linear("GiB", "gibibyte", 1_073_741_824.0),
        ],
    },
    UnitFamily {
        name: "Length",
        base_type: LINEAR,
        units: &[
            UnitDef::linear("m", "metre", 1.0),
            UnitDef::linear("km", "kilometre", 1e3),
            UnitDef::linear("cm", "centimetre", 1e-2),
            UnitDef::linear("mm", "millimetre", 1e-3),
            UnitDef::linear("um", "micrometre", 1e-6),
            UnitDef::linear("in", "inch", 0.0254),
            UnitDef::linear("ft", "foot", 0.3048),
            UnitDef::linear("yd", "yard", 0.9144),
            UnitDef::linear("mi", "mile", 1609.344),
            UnitDef::linear("nmi", "nautical mile", 1852.0),
        ],
    },
    UnitFamily {
        name: "Mass",
        base_type: LINEAR,
        units: &[
            UnitDef::linear("kg", "kilogram", 1.0),
            UnitDef::linear("g", "gram", 1e-3),
            UnitDef::linear("mg", "milligram", 1e-6),
            UnitDef::linear("t", "tonne", 1e3),
            UnitDef::linear("lb", "pound", 0.453_592_37),
            UnitDef::linear("oz", "ounce", 0.028_349_523_125),
        ],
    },
    UnitFamily {
        name: "Temperature",
        base_type: TypeSet::SCALAR,
        units: &[
            UnitDef::linear("K", "kelvin", 1.0),
            UnitDef::affine("C", "degree Celsius", 1.0, 273.15),
            UnitDef::affine("F", "degree Fahrenheit", 5.0 / 9.0, 459.67 * 5.0 / 9.0),
            UnitDef::linear("R", "degree Rankine", 5.0 / 9.0),
        ],
    },
    UnitFamily {
        name: "Time",
        base_type: LINEAR,
        units: &[
            UnitDef::linear("s", "second", 1.0),
            UnitDef::linear("ms", "millisecond", 1e-3),
            UnitDef::linear("us", "microsecond", 1e-6),
            UnitDef::linear("min", "minute", 60.0),
            UnitDef::linear("h", "hour", 3600.0),
            UnitDef::linear("day", "day", 86_400.0),
            UnitDef::linear("wk", "week", 604_800.0),
        ],
    },
];

/// Every unit family, alphabetically.
pub fn families() -> &'static [UnitFamily] {
    FAMILIES
}

/// Find a unit by name (without the underscore).
pub fn lookup(name: &str) -> Option<(&'static UnitFamily, &'static UnitDef)> {
    FAMILIES
        .iter()
        .find_map(|family| family.find(name).map(|unit| (family, unit)))
}

/// Literal forms (`_name`) of every unit whose name starts with `partial`,
/// in catalog order.
pub fn complete(partial: &str) -> Vec<String> {
    FAMILIES
        .iter()
        .flat_map(|family| family.units)
        .filter(|unit| unit.name.starts_with(partial))
        .map(UnitDef::usage)
        .collect()
}
