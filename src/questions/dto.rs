use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::questions::repo::{PerguntaUsuario, StatusPergunta};
use crate::session::Flash;

/// Request body for the public question form on the game page.
#[derive(Debug, Deserialize)]
pub struct EnviarPerguntaRequest {
    pub pergunta: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponderRequest {
    pub resposta: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicarLoteRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroPerguntas {
    pub status: Option<StatusPergunta>,
}

#[derive(Debug, Serialize)]
pub struct PerguntaView {
    #[serde(flatten)]
    pub pergunta: PerguntaUsuario,
    pub status_display: &'static str,
}

impl From<PerguntaUsuario> for PerguntaView {
    fn from(pergunta: PerguntaUsuario) -> Self {
        let status_display = pergunta.status.display();
        PerguntaView {
            pergunta,
            status_display,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListaPerguntasResponse {
    pub perguntas: Vec<PerguntaView>,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct PublicacaoLoteResponse {
    pub mensagem: String,
    pub publicadas: Vec<Uuid>,
    pub ignoradas: Vec<Uuid>,
}
