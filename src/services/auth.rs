// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, LoginResponse, Usuario, UsuarioPayload},
};

/// Regras de composição de senha, além do tamanho mínimo do payload.
/// Retorna a lista de problemas encontrados (vazia = senha aceita).
pub(crate) fn valida_senha(senha: &str) -> Vec<String> {
    let mut erros = Vec::new();

    if senha.chars().count() < 8 {
        erros.push("A senha deve possuir, no mínimo, 8 caracteres".to_string());
    }

    let mut minusculas = 0;
    let mut maiusculas = 0;
    let mut numeros = 0;
    let mut simbolos = 0;

    for c in senha.chars() {
        if c.is_ascii_lowercase() {
            minusculas += 1;
        } else if c.is_ascii_uppercase() {
            maiusculas += 1;
        } else if c.is_ascii_digit() {
            numeros += 1;
        } else {
            simbolos += 1;
        }
    }

    if minusculas == 0 {
        erros.push("A senha deve possuir letra(s) minúscula(s)".to_string());
    }
    if maiusculas == 0 {
        erros.push("A senha deve possuir letra(s) maiúscula(s)".to_string());
    }
    if numeros == 0 {
        erros.push("A senha deve possuir número(s)".to_string());
    }
    if simbolos == 0 {
        erros.push("A senha deve possuir símbolo(s)".to_string());
    }

    erros
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn registrar_usuario(&self, payload: &UsuarioPayload) -> Result<Usuario, AppError> {
        let erros_senha = valida_senha(&payload.senha);
        if !erros_senha.is_empty() {
            return Err(AppError::SenhaFraca(erros_senha));
        }

        let senha_hash = Self::hash_senha(payload.senha.clone()).await?;

        self.user_repo
            .create_usuario(
                &payload.nome,
                &payload.email,
                &senha_hash,
                &payload.cpf,
                &payload.celular,
            )
            .await
    }

    pub async fn atualizar_usuario(
        &self,
        id: Uuid,
        payload: &UsuarioPayload,
    ) -> Result<Usuario, AppError> {
        let erros_senha = valida_senha(&payload.senha);
        if !erros_senha.is_empty() {
            return Err(AppError::SenhaFraca(erros_senha));
        }

        let senha_hash = Self::hash_senha(payload.senha.clone()).await?;

        self.user_repo
            .update_usuario(
                id,
                &payload.nome,
                &payload.email,
                &senha_hash,
                &payload.cpf,
                &payload.celular,
            )
            .await
    }

    /// Login: verifica as credenciais e emite um JWT com validade de 1 hora.
    /// A mesma mensagem genérica cobre e-mail desconhecido e senha errada.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse, AppError> {
        let usuario = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let senha_clone = senha.to_owned();
        let hash_clone = usuario.senha.clone();

        // Executa a verificação (custosa) fora do runtime async
        let senha_valida = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&usuario)?;
        Ok(LoginResponse {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
            token,
        })
    }

    // O hashing pode ficar fora de qualquer transação: não toca no banco.
    async fn hash_senha(senha: String) -> Result<String, AppError> {
        let senha_hash = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(senha_hash)
    }

    fn create_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(1);

        let claims = Claims {
            sub: usuario.id,
            nome: usuario.nome.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn senha_forte_passa_sem_erros() {
        assert!(valida_senha("Abcdef1!").is_empty());
        assert!(valida_senha("S3nha#Forte").is_empty());
    }

    #[test]
    fn senha_curta_e_reprovada() {
        let erros = valida_senha("Ab1!");
        assert!(erros.iter().any(|e| e.contains("8 caracteres")));
    }

    #[test]
    fn cada_classe_ausente_gera_um_erro() {
        // sem maiúscula
        assert!(
            valida_senha("abcdef1!")
                .iter()
                .any(|e| e.contains("maiúscula"))
        );
        // sem minúscula
        assert!(
            valida_senha("ABCDEF1!")
                .iter()
                .any(|e| e.contains("minúscula"))
        );
        // sem número
        assert!(valida_senha("Abcdefg!").iter().any(|e| e.contains("número")));
        // sem símbolo
        assert!(valida_senha("Abcdefg1").iter().any(|e| e.contains("símbolo")));
    }

    #[test]
    fn senha_so_com_letras_acumula_erros() {
        let erros = valida_senha("abc");
        assert_eq!(erros.len(), 4); // curta, sem maiúscula, sem número, sem símbolo
    }
}
