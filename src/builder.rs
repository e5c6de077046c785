use crate::engine::{LcsEngine, TieBreak};

pub struct LcsEngineBuilder {
    tie_break: Option<TieBreak>,
}

impl LcsEngineBuilder {
    pub fn new() -> Self {
        Self { tie_break: None }
    }
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = Some(tie_break);
        self
    }
    pub fn build(self) -> LcsEngine {
        match self.tie_break {
            Some(tb) => LcsEngine::with_tie_break(tb),
            None => LcsEngine::new(),
        }
    }
}

impl Default for LcsEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::LcsEngineBuilder;
    use crate::engine::TieBreak;

    #[test]
    fn defaults_to_prefer_up() {
        assert_eq!(LcsEngineBuilder::new().build().tie_break(), TieBreak::PreferUp);
    }

    #[test]
    fn explicit_policy_is_kept() {
        let engine = LcsEngineBuilder::new()
            .with_tie_break(TieBreak::PreferLeft)
            .build();
        assert_eq!(engine.tie_break(), TieBreak::PreferLeft);
    }
}
