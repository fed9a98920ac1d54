//! Measurement units offered by the ingredient forms.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Unit preselected for a freshly added ingredient row.
pub const DEFAULT_UNIT: &str = "g";

pub const UNIT_OPTIONS: &[UnitOption] = &[
    UnitOption { code: "", label: "" },
    UnitOption { code: "g", label: "Gramm (g)" },
    UnitOption { code: "kg", label: "Kilogramm (kg)" },
    UnitOption { code: "ml", label: "Milliliter (ml)" },
    UnitOption { code: "l", label: "Liter (l)" },
    UnitOption { code: "Stk.", label: "Stück (St)" },
    UnitOption { code: "cm", label: "Zentimeter³ (cc)" },
    UnitOption { code: "Tasse/n", label: "Tasse (Cup)" },
    UnitOption { code: "EL", label: "Esslöffel (EL)" },
    UnitOption { code: "TL", label: "Teelöffel (TL)" },
    UnitOption { code: "Prise", label: "Prise" },
    // very small amounts
    UnitOption { code: "Messerspitze", label: "Messerspitze" },
];

pub fn find_unit(code: &str) -> Option<&'static UnitOption> {
    UNIT_OPTIONS.iter().find(|option| option.code == code)
}

pub fn unit_label(code: &str) -> Option<&'static str> {
    find_unit(code).map(|option| option.label)
}

pub fn is_known_unit(code: &str) -> bool {
    find_unit(code).is_some()
}
