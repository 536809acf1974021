use serde::Serialize;

use crate::auth::dto::UserInfo;
use crate::games::repo::{
    AtualizacaoJogo, AvaliacaoEspecialista, CaracteristicaJogo, ImagemJogo, Jogo, RequisitoJogo,
};
use crate::games::services::GrupoFaq;
use crate::session::Flash;

/// Context for the game page, mirroring what the template layer renders.
#[derive(Debug, Serialize)]
pub struct PaginaJogoResponse {
    pub jogo: JogoDetalhes,
    pub caracteristicas: Vec<CaracteristicaJogo>,
    pub requisitos_minimos: Vec<RequisitoJogo>,
    pub requisitos_recomendados: Vec<RequisitoJogo>,
    pub atualizacoes: Vec<AtualizacaoJogo>,
    pub faqs_por_categoria: Vec<GrupoFaq>,
    pub imagens: Vec<ImagemJogo>,
    pub avaliacoes_especialistas: Vec<AvaliacaoEspecialista>,
    pub media_avaliacoes: f64,
    pub total_avaliacoes: i64,
    pub user_info: UserInfo,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct JogoDetalhes {
    #[serde(flatten)]
    pub jogo: Jogo,
    pub plataformas_lista: Vec<String>,
    pub imagem_capa_url: String,
}

impl From<Jogo> for JogoDetalhes {
    fn from(jogo: Jogo) -> Self {
        let plataformas_lista = jogo.plataformas_lista();
        let imagem_capa_url = jogo.imagem_capa_url();
        JogoDetalhes {
            jogo,
            plataformas_lista,
            imagem_capa_url,
        }
    }
}
