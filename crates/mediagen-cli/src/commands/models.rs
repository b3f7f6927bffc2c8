use super::parse_kind;
use anyhow::Result;
use mediagen_core::models::model_names;
use mediagen_core::MediaKind;

const ALL_KINDS: [MediaKind; 4] = [
    MediaKind::Image,
    MediaKind::Video,
    MediaKind::ThreeD,
    MediaKind::Music,
];

pub fn run(kind: Option<&str>) -> Result<()> {
    let kinds: Vec<MediaKind> = match kind {
        Some(name) => vec![parse_kind(name)?],
        None => ALL_KINDS.to_vec(),
    };

    for kind in kinds {
        println!("{}:", kind);
        for name in model_names(kind) {
            println!("  {}", name);
        }
    }

    Ok(())
}
