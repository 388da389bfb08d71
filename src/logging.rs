// ==========================================
// Inicialização do sistema de logs
// ==========================================
// Usa tracing e tracing-subscriber
// Nível configurável por variável de ambiente
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o sistema de logs
///
/// # Variáveis de ambiente
/// - RUST_LOG: filtro de nível (padrão: info)
///   Ex.: RUST_LOG=debug ou RUST_LOG=gestao_funcionarios=trace
///
/// # Exemplo
/// ```no_run
/// use gestao_funcionarios::logging;
/// logging::init();
/// ```
pub fn init() {
    // Lê o nível da variável de ambiente, padrão info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inicializa os logs para ambiente de teste
///
/// Nível mais verboso, com saída capturada pelo harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
