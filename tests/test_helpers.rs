// ==========================================
// Auxiliares compartilhados dos testes de integração
// ==========================================

use gestao_funcionarios::importer::{CampoAlvo, FuncionarioImporterImpl, UniversalFileParser};
use gestao_funcionarios::repository::FuncionarioRepositoryImpl;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Escopo organizacional usado nos cenários
pub const CNPJ_TESTE: &str = "11222333000181";

/// Vínculos (rótulo da coluna → campo alvo) para o cabeçalho padrão dos fixtures
pub fn vinculos_padrao() -> Vec<(String, CampoAlvo)> {
    vec![
        ("Nome Completo".to_string(), CampoAlvo::NomeCompleto),
        ("CPF".to_string(), CampoAlvo::Cpf),
        ("Data de Nascimento".to_string(), CampoAlvo::DataNascimento),
        ("Cargo".to_string(), CampoAlvo::Cargo),
        ("Salario".to_string(), CampoAlvo::Salario),
        ("Estado Civil".to_string(), CampoAlvo::EstadoCivil),
        ("Email".to_string(), CampoAlvo::Email),
        ("Telefone".to_string(), CampoAlvo::Telefone),
    ]
}

/// Cabeçalho padrão correspondente aos vínculos acima
pub const CABECALHO_PADRAO: &str =
    "Nome Completo,CPF,Data de Nascimento,Cargo,Salario,Estado Civil,Email,Telefone";

/// Escreve um arquivo de fixture dentro do diretório temporário
pub fn escrever_arquivo(dir: &TempDir, nome: &str, conteudo: &str) -> PathBuf {
    let path = dir.path().join(nome);
    std::fs::write(&path, conteudo).expect("falha ao escrever fixture");
    path
}

/// Repositório SQLite em arquivo temporário + importador completo
pub fn criar_importer(
    dir: &TempDir,
) -> (
    Arc<FuncionarioRepositoryImpl>,
    FuncionarioImporterImpl<FuncionarioRepositoryImpl>,
) {
    let db_path = dir.path().join("gestao_teste.db");
    let repo = Arc::new(
        FuncionarioRepositoryImpl::new(db_path.to_str().expect("caminho de db inválido"))
            .expect("falha ao criar repositório de teste"),
    );
    let importer = FuncionarioImporterImpl::new(repo.clone(), Box::new(UniversalFileParser));
    (repo, importer)
}
