use crate::loader::Source;
use crate::state::LoadOrigin;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadMoves { source: Source, origin: LoadOrigin },
    LoadAbilities { source: Source, origin: LoadOrigin },
    PlayScrollTick { source: Source, volume: f32 },
}
