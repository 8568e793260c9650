// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "Maria Souza")]
    pub name: String,

    #[schema(example = "maria@exemplo.com.br")]
    pub email: String,

    pub phone: Option<String>,

    // IMPORTANTE para segurança: nunca serializar o hash
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 2, max = 100, message = "O nome deve ter entre 2 e 100 caracteres."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(max = 20, message = "Telefone muito longo."))]
    pub phone: Option<String>,

    #[validate(length(min = 6, max = 100, message = "A senha deve ter entre 6 e 100 caracteres."))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

// A senha precisa de maiúscula, minúscula e número (mesma regra do cadastro web).
fn validate_password_strength(password: &str) -> Result<(), validator::ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("password_strength");
        err.message = Some(
            "A senha deve conter pelo menos uma letra maiúscula, uma minúscula e um número."
                .into(),
        );
        Err(err)
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Atualização do perfil do usuário logado
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[validate(length(min = 2, max = 100, message = "O nome deve ter entre 2 e 100 caracteres."))]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Telefone muito longo."))]
    pub phone: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn senha_forte_exige_maiuscula_minuscula_e_numero() {
        assert!(validate_password_strength("Abc123").is_ok());
        assert!(validate_password_strength("abc123").is_err());
        assert!(validate_password_strength("ABC123").is_err());
        assert!(validate_password_strength("Abcdef").is_err());
    }

    #[test]
    fn registro_valida_campos() {
        let payload = RegisterUserPayload {
            name: "Maria Souza".into(),
            email: "maria@exemplo.com.br".into(),
            phone: None,
            password: "Senha123".into(),
        };
        assert!(payload.validate().is_ok());

        let payload = RegisterUserPayload {
            name: "M".into(),
            email: "nao-e-email".into(),
            phone: None,
            password: "123".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
