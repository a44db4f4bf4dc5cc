//! Demo data loaded when the portal starts with seeding enabled.

use chrono::NaiveDate;

use super::applications::{
    Application, ApplicationId, InMemoryApplicationRepository, RepositoryError, Transition,
    TransitionError,
};
use super::offers::{Offer, OfferCatalog, OfferId};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed date '{value}': {source}")]
    Date {
        value: &'static str,
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

enum SeedResponse {
    Pending,
    Accepted {
        on: &'static str,
    },
    Rejected {
        on: &'static str,
        comment: &'static str,
    },
}

struct SeedApplication {
    id: &'static str,
    company: &'static str,
    position: &'static str,
    applied_on: &'static str,
    response: SeedResponse,
}

const APPLICATIONS: [SeedApplication; 5] = [
    SeedApplication {
        id: "1",
        company: "TechCorp Chile",
        position: "Desarrollador Full Stack",
        applied_on: "2024-01-15",
        response: SeedResponse::Accepted { on: "2024-01-22" },
    },
    SeedApplication {
        id: "2",
        company: "AI Solutions",
        position: "Machine Learning Engineer",
        applied_on: "2024-01-12",
        response: SeedResponse::Accepted { on: "2024-01-19" },
    },
    SeedApplication {
        id: "3",
        company: "DataSoft Solutions",
        position: "Analista de Datos",
        applied_on: "2024-01-10",
        response: SeedResponse::Rejected {
            on: "2024-01-18",
            comment: "El perfil no se ajusta completamente a los requerimientos técnicos específicos del puesto.",
        },
    },
    SeedApplication {
        id: "4",
        company: "InnovaTech",
        position: "Desarrollador Mobile",
        applied_on: "2024-01-20",
        response: SeedResponse::Pending,
    },
    SeedApplication {
        id: "5",
        company: "CloudSystems",
        position: "DevOps Junior",
        applied_on: "2024-01-25",
        response: SeedResponse::Pending,
    },
];

fn seed_date(value: &'static str) -> Result<NaiveDate, SeedError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| SeedError::Date { value, source })
}

/// The student's applications, each driven through the regular transitions.
pub fn standard_applications() -> Result<Vec<Application>, SeedError> {
    APPLICATIONS
        .iter()
        .map(|seed| {
            let application = Application::new(
                ApplicationId::new(seed.id),
                seed.company,
                seed.position,
                seed_date(seed.applied_on)?,
            );

            let transition = match seed.response {
                SeedResponse::Pending => return Ok(application),
                SeedResponse::Accepted { on } => Transition::Accept {
                    responded_on: seed_date(on)?,
                },
                SeedResponse::Rejected { on, comment } => Transition::Reject {
                    responded_on: seed_date(on)?,
                    comment: Some(comment.to_string()),
                },
            };
            Ok(application.apply(transition)?)
        })
        .collect()
}

pub fn seeded_repository() -> Result<InMemoryApplicationRepository, SeedError> {
    Ok(InMemoryApplicationRepository::with_applications(
        standard_applications()?,
    )?)
}

pub fn standard_catalog() -> OfferCatalog {
    OfferCatalog::new(standard_offers())
}

fn offer(
    id: &str,
    company: &str,
    position: &str,
    attributes: [&str; 5],
    address: &str,
    applicants: u32,
    description: &str,
    requirements: [&str; 4],
) -> Offer {
    let [area, region, work_mode, duration, schedule] = attributes;
    Offer {
        id: OfferId::new(id),
        company: company.to_string(),
        position: position.to_string(),
        description: description.to_string(),
        area: area.to_string(),
        region: region.to_string(),
        work_mode: work_mode.to_string(),
        duration: duration.to_string(),
        schedule: schedule.to_string(),
        address: address.to_string(),
        applicants,
        requirements: requirements.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn standard_offers() -> Vec<Offer> {
    vec![
        offer(
            "1",
            "TechCorp Chile",
            "Desarrollador Full Stack",
            ["Desarrollo Web", "Región Metropolitana", "Híbrido", "6 meses", "9:00-18:00"],
            "Av. Vitacura 2939, Torre B, Piso 15, Las Condes, Santiago",
            12,
            "Desarrollar aplicaciones web utilizando tecnologías modernas como React, Node.js y bases de datos relacionales.",
            ["React", "Node.js", "JavaScript", "Git"],
        ),
        offer(
            "2",
            "DataSoft Solutions",
            "Analista de Datos",
            ["Data Science", "Región de Valparaíso", "Presencial", "4 meses", "8:00-17:00"],
            "Plaza Victoria 1398, Oficina 504, Valparaíso Centro",
            8,
            "Análisis de grandes volúmenes de datos para generar insights de negocio utilizando Python y herramientas de visualización.",
            ["Python", "SQL", "Power BI", "Estadística"],
        ),
        offer(
            "3",
            "CyberSecure Corp",
            "Especialista en Ciberseguridad",
            ["Ciberseguridad", "Región Metropolitana", "Online", "5 meses", "10:00-19:00"],
            "Modalidad remota - Sin dirección física",
            15,
            "Implementar y mantener sistemas de seguridad informática, realizar auditorías y análisis de vulnerabilidades.",
            ["Ethical Hacking", "Redes", "Linux", "Firewall"],
        ),
        offer(
            "4",
            "InnovaTech SpA",
            "Desarrollador Mobile",
            ["Desarrollo Mobile", "Región Metropolitana", "Presencial", "5 meses", "9:00-18:00"],
            "Av. Providencia 1208, Oficina 801, Providencia, Santiago",
            9,
            "Desarrollo de aplicaciones móviles nativas para iOS y Android usando React Native y Flutter.",
            ["React Native", "Flutter", "TypeScript", "Firebase"],
        ),
        offer(
            "5",
            "CloudSystems Ltda",
            "DevOps Junior",
            ["Cloud Computing", "Región de Valparaíso", "Híbrido", "6 meses", "8:00-17:00"],
            "Av. Pedro Montt 2055, Edificio Plaza, Piso 8, Valparaíso",
            6,
            "Gestión de infraestructura cloud, automatización de deployments y monitoreo de sistemas distribuidos.",
            ["AWS", "Docker", "Kubernetes", "Jenkins"],
        ),
        offer(
            "6",
            "AI Solutions Chile",
            "Machine Learning Engineer",
            ["Inteligencia Artificial", "Región Metropolitana", "Híbrido", "6 meses", "10:00-19:00"],
            "Nueva Las Condes 12205, Torre Norte, Piso 22, Las Condes, Santiago",
            18,
            "Desarrollo e implementación de modelos de machine learning para soluciones empresariales.",
            ["Python", "TensorFlow", "PyTorch", "MLOps"],
        ),
    ]
}
