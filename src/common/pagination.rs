// src/common/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

// Parâmetros de paginação baseados em offset: ?page=2&limit=20
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    // Valores fora da faixa não derrubam a requisição: são apenas ajustados.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

// Resposta paginada: os dados da página + os metadados que o front precisa.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, params: PaginationParams) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            ((total + i64::from(params.limit) - 1) / i64::from(params.limit)) as u32
        };

        Self {
            data,
            total,
            page: params.page,
            limit: params.limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_da_pagina() {
        assert_eq!(PaginationParams::new(1, 20).offset(), 0);
        assert_eq!(PaginationParams::new(2, 20).offset(), 20);
        assert_eq!(PaginationParams::new(5, 10).offset(), 40);
    }

    #[test]
    fn normalizacao_de_limites() {
        let params = PaginationParams::new(0, 0).normalized();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);

        let params = PaginationParams::new(3, 9999).normalized();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn total_de_paginas_arredonda_pra_cima() {
        let params = PaginationParams::new(1, 20);
        assert_eq!(PaginatedResponse::<u8>::new(vec![], 0, params).total_pages, 0);
        assert_eq!(PaginatedResponse::<u8>::new(vec![], 1, params).total_pages, 1);
        assert_eq!(PaginatedResponse::<u8>::new(vec![], 20, params).total_pages, 1);
        assert_eq!(PaginatedResponse::<u8>::new(vec![], 21, params).total_pages, 2);
        assert_eq!(PaginatedResponse::<u8>::new(vec![], 100, params).total_pages, 5);
    }

    #[test]
    fn resposta_carrega_metadados() {
        let params = PaginationParams::new(2, 10);
        let response = PaginatedResponse::new(vec![1, 2, 3], 23, params);
        assert_eq!(response.page, 2);
        assert_eq!(response.limit, 10);
        assert_eq!(response.total, 23);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.data, vec![1, 2, 3]);
    }
}
