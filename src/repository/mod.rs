// ==========================================
// Gestão de Funcionários - Camada de repositório
// ==========================================
// Responsabilidade: acesso a dados, escondendo detalhes do banco
// Restrição: toda consulta é parametrizada (sem SQL por concatenação)
// ==========================================

pub mod error;
pub mod funcionario_repo;
pub mod funcionario_repo_impl;

// Reexporta os tipos centrais
pub use error::{RepositoryError, RepositoryResult};
pub use funcionario_repo::{DuplicateLookup, FuncionarioRepository, FuncionarioUpdate};
pub use funcionario_repo_impl::FuncionarioRepositoryImpl;
