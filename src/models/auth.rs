use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login-json`; `user` is only present on newer backends.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<Profile>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialite: Option<String>,
}

/// Connected user as returned by `/auth/me`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub specialite: Option<Specialty>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        match self.prenom.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(prenom) => format!("{} {}", prenom.trim(), self.nom.trim()),
            None => self.nom.trim().to_string(),
        }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role.as_ref() == Some(role)
    }
}

/// The backend sends either the specialty name or the full specialty record.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum Specialty {
    Name(String),
    Detailed {
        id: i64,
        nom: String,
        #[serde(default)]
        couleur: Option<String>,
        #[serde(default)]
        icone: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl Specialty {
    pub fn name(&self) -> &str {
        match self {
            Specialty::Name(name) => name,
            Specialty::Detailed { nom, .. } => nom,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Medecin,
    Infirmier,
    Other(String),
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" | "administrateur" => Role::Admin,
            "medecin" | "médecin" | "doctor" => Role::Medecin,
            "infirmier" | "infirmière" | "infirmiere" | "nurse" => Role::Infirmier,
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Medecin => "medecin".to_string(),
            Role::Infirmier => "infirmier".to_string(),
            Role::Other(raw) => raw,
        }
    }
}
