//! Compiled-in baseline coefficients and service catalog.
//!
//! These values are the pricing baseline: a session with no persisted rules
//! prices exactly with these numbers.

// Default group multipliers
pub const DEFAULT_GROUP_FACTORS: &[(&str, f64)] = &[
    ("Sede Personalizado", 1.00),
    ("Musifamiliar Sede Grupal", 0.85),
    ("Sede Grupal", 0.75),
    ("Ensambles", 0.70),
    ("Hogar Personalizado", 1.35),
    ("Hogar Musifamiliar Grupal", 1.15),
    ("Virtual Personalizado", 0.85),
    ("Virtual Grupal", 0.65),
    ("Taller empresarial", 2.00),
    ("Curso Preuniversitario", 0.90),
    ("Curso de formación", 0.90),
    ("Curso Vacacional", 0.95),
    ("Musigym", 2.50),
    ("Plataforma Online", 1.20),
];

// Default type multipliers
pub const DEFAULT_TYPE_FACTORS: &[(&str, f64)] = &[
    ("Clase de prueba", 0.60),
    ("Clase individual", 1.10),
    ("Paquete", 1.00),
    ("Mes", 1.00),
    ("Otro", 1.00),
];

// Whole-pack multipliers by class count
pub const DEFAULT_PACK_DISCOUNTS: &[(u32, f64)] = &[
    (4, 1.00),
    (8, 0.97),
    (12, 0.95),
    (16, 0.94),
    (20, 0.93),
    (24, 0.90),
];

// One-month price multipliers by subscription length
pub const DEFAULT_MONTHS_MULTIPLIERS: &[(u32, f64)] = &[
    (1, 1.00),
    (2, 1.85),
    (3, 2.70),
    (6, 4.80),
    (12, 8.30),
];

pub const DEFAULT_SERVICE_NAMES: &[&str] = &[
    // Sede Personalizado
    "Sede Personalizado Clase de prueba",
    "Sede Personalizado Clase individual",
    "Sede Personalizado Paquete de 4 clases",
    "Sede Personalizado Paquete de 8 clases",
    "Sede Personalizado Paquete de 12 clases",
    "Sede Personalizado Paquete de 16 clases",
    "Sede Personalizado Paquete de 20 clases",
    "Sede Personalizado Paquete de 24 clases",
    // Musifamiliar Sede Grupal
    "Musifamiliar Sede Grupal Clase de prueba",
    "Musifamiliar Sede Grupal Paquete de 4 clases",
    "Musifamiliar Sede Grupal Paquete de 8 clases",
    "Musifamiliar Sede Grupal Paquete de 12 clases",
    "Musifamiliar Sede Grupal Paquete de 16 clases",
    // Sede Grupal
    "Sede Grupal Clase de prueba",
    "Sede Grupal Paquete de 4 clases",
    "Sede Grupal Paquete de 8 clases",
    "Sede Grupal Paquete de 12 clases",
    "Sede Grupal Paquete de 16 clases",
    // Ensambles
    "Ensambles Clase de prueba",
    "Ensambles 1 mes",
    "Ensambles 2 meses",
    "Ensambles 3 meses",
    "Ensambles 6 meses",
    // Hogar Personalizado
    "Hogar Personalizado Clase de prueba",
    "Hogar Personalizado Clase individual",
    "Hogar Personalizado Paquete de 4 clases",
    "Hogar Personalizado Paquete de 8 clases",
    "Hogar Personalizado Paquete de 12 clases",
    "Hogar Personalizado Paquete de 16 clases",
    // Hogar Musifamiliar Grupal
    "Hogar Musifamiliar Grupal Clase de prueba",
    "Hogar Musifamiliar Grupal Paquete de 4 clases",
    "Hogar Musifamiliar Grupal Paquete de 8 clases",
    "Hogar Musifamiliar Grupal Paquete de 12 clases",
    // Virtual Personalizado
    "Virtual Personalizado Clase de prueba",
    "Virtual Personalizado Clase individual",
    "Virtual Personalizado Paquete de 4 clases",
    "Virtual Personalizado Paquete de 8 clases",
    "Virtual Personalizado Paquete de 12 clases",
    "Virtual Personalizado Paquete de 16 clases",
    // Virtual Grupal
    "Virtual Grupal Clase de prueba",
    "Virtual Grupal Paquete de 4 clases",
    "Virtual Grupal Paquete de 8 clases",
    "Virtual Grupal Paquete de 12 clases",
    // Musigym
    "Musigym 1 mes",
    "Musigym 2 meses",
    "Musigym 3 meses",
    "Musigym 6 meses",
    "Musigym 12 meses",
    // Plataforma Online
    "Plataforma Online 1 mes",
    "Plataforma Online 3 meses",
    "Plataforma Online 6 meses",
    "Plataforma Online 12 meses",
    // Cursos
    "Curso Preuniversitario 1 mes",
    "Curso Preuniversitario 3 meses",
    "Curso Preuniversitario 6 meses",
    "Curso de formación 1 mes",
    "Curso de formación 3 meses",
    "Curso de formación 6 meses",
    "Curso Vacacional 1 mes",
    "Curso Vacacional 2 meses",
    // Taller empresarial
    "Taller empresarial Sesión",
    "Taller empresarial Paquete de 4 clases",
    "Taller empresarial Paquete de 8 clases",
];
