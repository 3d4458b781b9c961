//! Static catalog.
//!
//! The curated datasets ship with the app: method listings, the scam
//! audit wall and the blog. Premium entries carry a `pro-` id prefix
//! by convention, but gating always reads the premium flag, never the
//! id.

use chrono::NaiveDate;

use plata_core::catalog::{
    BlogPost, Difficulty, Method, MethodCategory, RiskLevel, ScamEntry, ScamStatus,
};
use plata_core::ports::CatalogPort;

pub struct StaticCatalog {
    methods: Vec<Method>,
    scams: Vec<ScamEntry>,
    posts: Vec<BlogPost>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            methods: methods(),
            scams: scams(),
            posts: posts(),
        }
    }
}

impl CatalogPort for StaticCatalog {
    fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn scams(&self) -> &[ScamEntry] {
        &self.scams
    }

    fn posts(&self) -> &[BlogPost] {
        &self.posts
    }
}

fn method(
    id: &str,
    name: &str,
    description: &str,
    category: MethodCategory,
    difficulty: Difficulty,
    rating: u8,
    premium: bool,
) -> Method {
    Method {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        difficulty,
        verified: true,
        investment_required: false,
        rating,
        premium,
        potential_earnings: None,
        link: None,
        content: None,
    }
}

fn methods() -> Vec<Method> {
    vec![
        Method {
            potential_earnings: Some("$50 - $300 / mes".to_string()),
            link: Some("https://www.usertesting.com".to_string()),
            content: Some(
                "Graba tu pantalla probando webs y apps. Pagan por test completado; \
                 la clave es responder rápido a las invitaciones."
                    .to_string(),
            ),
            ..method(
                "1",
                "Testeo de Usabilidad Web",
                "Cobra por navegar sitios en voz alta y reportar fricciones.",
                MethodCategory::Freelance,
                Difficulty::Beginner,
                4,
                false,
            )
        },
        Method {
            potential_earnings: Some("$100 - $800 / mes".to_string()),
            ..method(
                "2",
                "Venta de Plantillas Digitales",
                "Diseña plantillas de productividad una vez y véndelas en marketplaces.",
                MethodCategory::Ecommerce,
                Difficulty::Intermediate,
                4,
                false,
            )
        },
        Method {
            investment_required: true,
            ..method(
                "3",
                "Micro-Tareas Remuneradas",
                "Encuestas y tareas cortas para monedero digital. Volumen bajo, riesgo nulo.",
                MethodCategory::Tasks,
                Difficulty::Beginner,
                3,
                false,
            )
        },
        Method {
            potential_earnings: Some("$500 - $2000 / mes".to_string()),
            content: Some(
                "Guía completa del embudo: captación de clientes en frío, cierre por \
                 llamada y escalado con un equipo de setters."
                    .to_string(),
            ),
            ..method(
                "pro-1",
                "High Ticket Closing en Español",
                "Cierra ventas de programas de $2k+ a comisión. Guía privada paso a paso.",
                MethodCategory::HighTicket,
                Difficulty::Advanced,
                5,
                true,
            )
        },
        Method {
            investment_required: true,
            potential_earnings: Some("Variable".to_string()),
            content: Some(
                "Estrategia de arbitraje entre exchanges con gestión de riesgo estricta \
                 y bitácora de operaciones incluida."
                    .to_string(),
            ),
            ..method(
                "pro-2",
                "Arbitraje Cripto Sistemático",
                "Sistema de trading con reglas fijas. Solo para perfiles con capital.",
                MethodCategory::Crypto,
                Difficulty::Expert,
                4,
                true,
            )
        },
    ]
}

fn scam(
    id: &str,
    name: &str,
    kind: &str,
    risk_level: RiskLevel,
    status: ScamStatus,
    reason: &str,
    date_reported: &str,
) -> ScamEntry {
    ScamEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        risk_level,
        status,
        reason: reason.to_string(),
        date_reported: Some(date_reported.to_string()),
    }
}

fn scams() -> Vec<ScamEntry> {
    vec![
        scam(
            "s1",
            "AlphaYield Global",
            "Ponzi Scheme",
            RiskLevel::Critical,
            ScamStatus::Scam,
            "Retornos fijos del 10% semanal sin actividad real. Pagos congelados.",
            "2024",
        ),
        scam(
            "s2",
            "TaskVip-Express",
            "Task Scam",
            RiskLevel::High,
            ScamStatus::Scam,
            "Deja retirar montos pequeños y luego exige un depósito para continuar.",
            "2024",
        ),
        scam(
            "s3",
            "QuantumBot FX",
            "Trading Bot",
            RiskLevel::Critical,
            ScamStatus::Scam,
            "Algoritmo inexistente; pagaban con el capital de nuevos entrantes.",
            "2023",
        ),
        scam(
            "w1",
            "Gestión de Reseñas Locales",
            "Marketing Grey Hat",
            RiskLevel::Warning,
            ScamStatus::Warning,
            "Negocio real pero frágil: la plataforma puede borrar las reseñas.",
            "Activo",
        ),
        scam(
            "l1",
            "Upwork",
            "Freelance",
            RiskLevel::Safe,
            ScamStatus::Legit,
            "Plataforma con depósito en garantía: si el trabajo se entrega, se cobra.",
            "Verificado",
        ),
        scam(
            "l2",
            "UserTesting",
            "Usability",
            RiskLevel::Safe,
            ScamStatus::Legit,
            "Empresa consolidada que paga por sesiones de prueba grabadas.",
            "Verificado",
        ),
    ]
}

fn post(
    id: &str,
    title: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    read_time: &str,
    date: NaiveDate,
    premium: bool,
) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        read_time: read_time.to_string(),
        date,
        premium,
    }
}

fn posts() -> Vec<BlogPost> {
    let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("static catalog date");
    vec![
        post(
            "1",
            "Cómo detectar un Ponzi en 5 minutos",
            "Tres señales que delatan a cualquier esquema de retorno fijo.",
            "Si prometen rentabilidad fija, presionan con urgencia y el producto \
             es invisible, ya tienes el diagnóstico completo.",
            "Seguridad",
            "4 min",
            day(2025, 1, 12),
            false,
        ),
        post(
            "2",
            "Primeros $100 online sin invertir",
            "Ruta realista para un principiante con 10 horas semanales.",
            "Combina testeo de usabilidad con micro-tareas mientras construyes \
             un servicio freelance que sí escala.",
            "Guías",
            "6 min",
            day(2025, 2, 3),
            false,
        ),
        post(
            "pro-1",
            "El guion de cierre que no se comparte",
            "La estructura exacta de llamada que usan los closers top.",
            "Apertura de marco, diagnóstico, manejo de objeciones por anticipado \
             y cierre por compromiso: el guion completo, línea por línea.",
            "Ventas",
            "12 min",
            day(2025, 3, 18),
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_per_collection() {
        let catalog = StaticCatalog::new();

        let mut method_ids: Vec<_> = catalog.methods().iter().map(|m| &m.id).collect();
        method_ids.sort();
        method_ids.dedup();
        assert_eq!(method_ids.len(), catalog.methods().len());

        let mut scam_ids: Vec<_> = catalog.scams().iter().map(|s| &s.id).collect();
        scam_ids.sort();
        scam_ids.dedup();
        assert_eq!(scam_ids.len(), catalog.scams().len());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = StaticCatalog::new();
        assert!(catalog.method_by_id("pro-1").unwrap().premium);
        assert!(!catalog.method_by_id("1").unwrap().premium);
        assert!(catalog.method_by_id("nope").is_none());
        assert_eq!(catalog.scam_by_id("s1").unwrap().status, ScamStatus::Scam);
        assert!(catalog.post_by_id("pro-1").unwrap().premium);
    }

    #[test]
    fn test_catalog_has_free_and_premium_tiers() {
        let catalog = StaticCatalog::new();
        assert!(catalog.methods().iter().any(|m| m.premium));
        assert!(catalog.methods().iter().any(|m| !m.premium));
        assert!(catalog.posts().iter().any(|p| p.premium));
        assert!(catalog.posts().iter().any(|p| !p.premium));
        // The audit wall is always free.
        assert!(!catalog.scams().is_empty());
    }
}
