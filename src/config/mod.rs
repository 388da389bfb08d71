// ==========================================
// Gestão de Funcionários - Camada de configuração
// ==========================================
// Escopo: opções reconhecidas de uma execução de importação
// Regra: configuração é entrada da execução; o mesmo arquivo com
// as mesmas opções produz o mesmo resultado (reexecutável)
// ==========================================

pub mod import_options;

pub use import_options::ImportOptions;
