//! Template texts compiled into the binary.

use crate::model::TemplateId;

const SERVICE: &str = include_str!("../../../templates/service.txt");
const PARTNERSHIP: &str = include_str!("../../../templates/partnership.txt");
const NDA: &str = include_str!("../../../templates/nda.txt");

pub fn text(id: TemplateId) -> &'static str {
    match id {
        TemplateId::Service => SERVICE,
        TemplateId::Partnership => PARTNERSHIP,
        TemplateId::Nda => NDA,
    }
}
