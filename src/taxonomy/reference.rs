//! Reference layout of the monthly compliance archive
//!
//! Only the SMS branches down to `3.x` mirror the production archive. The
//! sub-folders of Qualidade, Prazo and Gestão, and the leaves under SMS 3.3,
//! are placeholder layouts; pass a taxonomy file for a real archive.

use super::{Category, Taxonomy, TaxonomyNode};

fn leaf() -> TaxonomyNode {
    TaxonomyNode::leaf()
}

fn node<const N: usize>(children: [(&str, TaxonomyNode); N]) -> TaxonomyNode {
    TaxonomyNode::interior(children)
}

fn sms() -> Category {
    Category::new(
        "1. SMS",
        node([
            (
                "1. Incidentes",
                node([
                    ("1.1 Abrangencia das Ocorrencias", leaf()),
                    ("1.2 Tratamento das Ocorrencias", leaf()),
                    ("1.3 Ocorrencias", leaf()),
                ]),
            ),
            (
                "2. Normas Regulamentadoras",
                node([("2.1 Matriz de Treinamento e NR 01", leaf())]),
            ),
            (
                "3. Gestão de SMS",
                node([
                    (
                        "3.1 Inventário e Manutenção - Maquinas e Equipamentos",
                        leaf(),
                    ),
                    ("3.2 Avaliações Iniciais (PGR e PCMSO)", leaf()),
                    (
                        "3.3 Ferramentas Proativas",
                        node([
                            ("DDS", leaf()),
                            ("Inspeções de Segurança", leaf()),
                            ("Observações Comportamentais", leaf()),
                        ]),
                    ),
                    ("3.4 Tratamento de NC e Desvios", leaf()),
                ]),
            ),
        ]),
    )
}

fn qualidade() -> Category {
    Category::new(
        "2. Qualidade",
        node([
            (
                "2.1 Controle de Documentos",
                node([
                    ("1. Lista Mestra", leaf()),
                    ("2. Controle de Registros", leaf()),
                ]),
            ),
            (
                "2.2 Inspeção e Ensaios",
                node([
                    ("1. Relatórios de Inspeção", leaf()),
                    ("2. Calibração de Instrumentos", leaf()),
                ]),
            ),
            (
                "2.3 Não Conformidades",
                node([
                    ("1. Registros de Não Conformidade", leaf()),
                    ("2. Ações Corretivas", leaf()),
                ]),
            ),
            (
                "2.4 Satisfação do Cliente",
                node([("1. Pesquisas de Satisfação", leaf())]),
            ),
        ]),
    )
}

fn prazo() -> Category {
    Category::new(
        "3. Prazo",
        node([
            (
                "3.1 Planejamento",
                node([
                    ("1. Cronograma Físico", leaf()),
                    ("2. Curva S", leaf()),
                ]),
            ),
            (
                "3.2 Acompanhamento",
                node([
                    ("1. Boletins de Medição", leaf()),
                    ("2. Relatório Diário de Obra", leaf()),
                ]),
            ),
        ]),
    )
}

fn gestao() -> Category {
    Category::new(
        "4. Gestão",
        node([
            (
                "1. Reuniões",
                node([
                    ("1.1 Atas de Reunião", leaf()),
                    ("1.2 Plano de Ação", leaf()),
                ]),
            ),
            (
                "2. Recursos Humanos",
                node([
                    ("2.1 Quadro de Efetivo", leaf()),
                    ("2.2 Treinamentos", leaf()),
                ]),
            ),
            (
                "3. Indicadores",
                node([("3.1 Relatório Mensal de Indicadores", leaf())]),
            ),
        ]),
    )
}

pub(super) fn reference_taxonomy() -> Taxonomy {
    Taxonomy {
        categories: vec![sms(), qualidade(), prazo(), gestao()],
    }
}
