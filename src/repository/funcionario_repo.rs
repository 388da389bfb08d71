// ==========================================
// Gestão de Funcionários - Traits de repositório
// ==========================================
// Escopo: acesso a dados da importação (consulta de duplicidade,
// aplicação das decisões, auditoria de execução)
// Regra: repositório não contém regra de negócio, só CRUD
// ==========================================

use crate::domain::funcionario::{
    CampoAlterado, Funcionario, FuncionarioSnapshot, ImportRunSummary,
};
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// DuplicateLookup - capacidade de consulta usada pelo classificador
// ==========================================
// Chave de escopo: (CPF normalizado, CNPJ da empresa)
#[async_trait]
pub trait DuplicateLookup: Send + Sync {
    /// Busca o registro existente para (cpf, empresa).
    ///
    /// # Retorno
    /// - Ok(Some(snapshot)): registro existente, com os campos mutáveis
    ///   capturados para diff de atualização
    /// - Ok(None): nenhuma duplicata
    /// - Err: falha de consulta; o chamador trata como erro de linha,
    ///   distinguível de "nenhuma duplicata"
    async fn find_by_cpf_in_scope(
        &self,
        cpf: &str,
        empresa_cnpj: &str,
    ) -> Result<Option<FuncionarioSnapshot>, Box<dyn Error>>;
}

// ==========================================
// FuncionarioUpdate - atualização decidida pelo motor de resolução
// ==========================================
#[derive(Debug, Clone)]
pub struct FuncionarioUpdate {
    pub funcionario_id: String,
    pub novo: Funcionario,
    pub campos_alterados: Vec<CampoAlterado>,
}

// ==========================================
// FuncionarioRepository - acesso a dados da importação
// ==========================================
// Implementador: FuncionarioRepositoryImpl (rusqlite)
#[async_trait]
pub trait FuncionarioRepository: DuplicateLookup {
    /// Insere em lote os registros decididos como "importar" (transacional)
    ///
    /// # Retorno
    /// - Ok(usize): quantidade inserida
    /// - Err: erro de banco (transação inteira revertida)
    async fn batch_insert_funcionarios(
        &self,
        funcionarios: Vec<Funcionario>,
    ) -> Result<usize, Box<dyn Error>>;

    /// Aplica em lote as atualizações decididas (transacional)
    async fn batch_update_funcionarios(
        &self,
        updates: Vec<FuncionarioUpdate>,
    ) -> Result<usize, Box<dyn Error>>;

    /// Registra o resumo da execução como artefato de auditoria
    async fn insert_import_run(
        &self,
        summary: &ImportRunSummary,
    ) -> Result<(), Box<dyn Error>>;

    /// Execuções mais recentes (para a tela de histórico)
    async fn recent_import_runs(
        &self,
        limit: usize,
    ) -> Result<Vec<ImportRunSummary>, Box<dyn Error>>;

    /// Total de funcionários persistidos (apoio a testes e dashboards)
    async fn count_funcionarios(&self) -> Result<usize, Box<dyn Error>>;
}
