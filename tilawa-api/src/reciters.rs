//! Audio editions offered for recitation

use serde::Serialize;

/// A selectable recitation (audio edition)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reciter {
    /// AlQuran Cloud edition identifier
    pub id: &'static str,
    pub name: &'static str,
    pub english_name: &'static str,
}

/// Edition used until the reader picks another one
pub const DEFAULT_RECITER: &str = "ar.alafasy";

pub const AVAILABLE_RECITERS: &[Reciter] = &[
    Reciter {
        id: "ar.alafasy",
        name: "مشاري راشد العفاسي",
        english_name: "Alafasy",
    },
    Reciter {
        id: "ar.abdulbasitmurattal",
        name: "عبد الباسط عبد الصمد",
        english_name: "Abdul Basit (Murattal)",
    },
    Reciter {
        id: "ar.husary",
        name: "محمود خليل الحصري",
        english_name: "Husary",
    },
    Reciter {
        id: "ar.minshawi",
        name: "محمد صديق المنشاوي",
        english_name: "Minshawi",
    },
    Reciter {
        id: "ar.mahermuaiqly",
        name: "ماهر المعيقلي",
        english_name: "Maher Al Muaiqly",
    },
];

/// Look up a built-in reciter by edition id
pub fn find_reciter(id: &str) -> Option<&'static Reciter> {
    AVAILABLE_RECITERS.iter().find(|r| r.id == id)
}
