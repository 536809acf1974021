use serde::Serialize;

use crate::games::repo::FaqJogo;

/// FAQs grouped under one category display label.
#[derive(Debug, Serialize)]
pub struct GrupoFaq {
    pub categoria: &'static str,
    pub faqs: Vec<FaqJogo>,
}

/// Groups FAQs by category label, preserving the order in which each
/// category is first encountered (the input is already in display order).
pub fn agrupar_faqs_por_categoria(faqs: Vec<FaqJogo>) -> Vec<GrupoFaq> {
    let mut grupos: Vec<GrupoFaq> = Vec::new();
    for faq in faqs {
        let rotulo = faq.categoria.display();
        match grupos.iter_mut().find(|g| g.categoria == rotulo) {
            Some(grupo) => grupo.faqs.push(faq),
            None => grupos.push(GrupoFaq {
                categoria: rotulo,
                faqs: vec![faq],
            }),
        }
    }
    grupos
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResumoAvaliacoes {
    pub media: f64,
    pub total: i64,
}

/// Defaults shown before the game has collected real reviews.
const MEDIA_PADRAO: f64 = 4.8;
const TOTAL_PADRAO: i64 = 50;

pub fn resumo_avaliacoes(media: Option<f64>, total: i64) -> ResumoAvaliacoes {
    ResumoAvaliacoes {
        media: media.unwrap_or(MEDIA_PADRAO),
        total: if total > 0 { total } else { TOTAL_PADRAO },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::repo::CategoriaFaq;
    use time::macros::datetime;
    use uuid::Uuid;

    fn faq(categoria: CategoriaFaq, pergunta: &str) -> FaqJogo {
        FaqJogo {
            id: Uuid::new_v4(),
            jogo_id: Uuid::new_v4(),
            pergunta: pergunta.into(),
            resposta: "resposta".into(),
            ordem: 1,
            ativo: true,
            visivel: true,
            categoria,
            data_criacao: datetime!(2024-01-15 10:00 UTC),
            data_atualizacao: datetime!(2024-01-15 10:00 UTC),
        }
    }

    #[test]
    fn grouping_preserves_encounter_order() {
        let faqs = vec![
            faq(CategoriaFaq::Tecnico, "t1"),
            faq(CategoriaFaq::Geral, "g1"),
            faq(CategoriaFaq::Tecnico, "t2"),
            faq(CategoriaFaq::Jogabilidade, "j1"),
        ];
        let grupos = agrupar_faqs_por_categoria(faqs);
        assert_eq!(grupos.len(), 3);
        assert_eq!(grupos[0].categoria, "Técnico");
        assert_eq!(grupos[0].faqs.len(), 2);
        assert_eq!(grupos[1].categoria, "Geral");
        assert_eq!(grupos[2].categoria, "Jogabilidade");
        assert_eq!(grupos[0].faqs[1].pergunta, "t2");
    }

    #[test]
    fn grouping_empty_input_yields_no_groups() {
        assert!(agrupar_faqs_por_categoria(Vec::new()).is_empty());
    }

    #[test]
    fn rating_summary_uses_defaults_when_unrated() {
        let resumo = resumo_avaliacoes(None, 0);
        assert_eq!(resumo.media, 4.8);
        assert_eq!(resumo.total, 50);
    }

    #[test]
    fn rating_summary_uses_real_aggregate() {
        let resumo = resumo_avaliacoes(Some(3.5), 12);
        assert_eq!(resumo.media, 3.5);
        assert_eq!(resumo.total, 12);
    }
}
