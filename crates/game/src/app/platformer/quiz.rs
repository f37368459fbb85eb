#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuizAnswer {
    /// Correct choice: the cursor advanced and the overlay closed.
    Dismissed,
    /// Wrong choice: the caller owes the player collaborator a restart
    /// request; the overlay stays up until the caller acts.
    Failed,
    /// The pointer landed outside every option region.
    Ignored,
}

/// Modal question overlay with a dormant countdown. While a question is up
/// the caller must route frames through the quiz path only; this type never
/// touches the world.
pub(crate) struct QuizInterrupt {
    interval_ticks: u32,
    countdown_ticks: u32,
    active: bool,
    bound_question: Option<usize>,
    option_regions: Vec<RectPx>,
}

impl QuizInterrupt {
    pub(crate) fn new(interval_ticks: u32) -> Self {
        Self {
            interval_ticks,
            countdown_ticks: 0,
            active: false,
            bound_question: None,
            option_regions: Vec::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn bound_question(&self) -> Option<usize> {
        self.bound_question
    }

    #[cfg(test)]
    pub(crate) fn option_regions(&self) -> &[RectPx] {
        &self.option_regions
    }

    #[cfg(test)]
    pub(crate) fn countdown_ticks(&self) -> u32 {
        self.countdown_ticks
    }

    /// Advances the dormant countdown by one rendered frame and opens the
    /// next unseen question when the interval is reached. Does nothing
    /// while a question is already up, and never fires once the bank is
    /// exhausted.
    pub(crate) fn tick_trigger(&mut self, progress: &QuizProgress, bank: &QuizBank) {
        if self.active {
            return;
        }
        self.countdown_ticks = self.countdown_ticks.saturating_add(1);
        if self.countdown_ticks < self.interval_ticks || !progress.has_unseen(bank) {
            return;
        }
        let question_index = progress.next_unseen();
        self.active = true;
        self.countdown_ticks = 0;
        self.bind_question(question_index, bank);
        info!(question = question_index, "quiz_opened");
    }

    /// Option regions are rebuilt only when the bound question actually
    /// changes; re-binding the same question after a wrong answer reuses
    /// the existing layout.
    fn bind_question(&mut self, question_index: usize, bank: &QuizBank) {
        if self.bound_question == Some(question_index) {
            return;
        }
        self.bound_question = Some(question_index);
        self.option_regions.clear();
        let option_count = bank
            .question(question_index)
            .map(|question| question.options.len())
            .unwrap_or(0);
        for option_index in 0..option_count {
            self.option_regions.push(option_region_rect(option_index));
        }
    }

    pub(crate) fn resolve_pointer_down(
        &mut self,
        x_px: i32,
        y_px: i32,
        progress: &mut QuizProgress,
        bank: &QuizBank,
    ) -> QuizAnswer {
        if !self.active {
            return QuizAnswer::Ignored;
        }
        let Some(question) = self.bound_question.and_then(|index| bank.question(index)) else {
            return QuizAnswer::Ignored;
        };
        let Some(hit_index) = self
            .option_regions
            .iter()
            .position(|region| region.contains(x_px, y_px))
        else {
            return QuizAnswer::Ignored;
        };

        if hit_index == question.answer {
            progress.advance();
            self.active = false;
            self.countdown_ticks = 0;
            info!(answered = progress.questions_answered(), "quiz_dismissed");
            QuizAnswer::Dismissed
        } else {
            info!(chosen = hit_index, expected = question.answer, "quiz_failed");
            QuizAnswer::Failed
        }
    }

    /// Redraws the full overlay. The framebuffer is cleared by the scene
    /// every frame, so this runs every frame while active even though the
    /// layout only changes with the bound question.
    pub(crate) fn draw_overlay(&self, surface: &mut dyn Surface, bank: &QuizBank) {
        if !self.active {
            return;
        }
        let Some(question) = self.bound_question.and_then(|index| bank.question(index)) else {
            return;
        };
        surface.fill_rect(QUIZ_PANEL, QUIZ_PANEL_BG_COLOR);
        surface.stroke_rect(QUIZ_PANEL, QUIZ_PANEL_BORDER_PX, QUIZ_PANEL_BORDER_COLOR);
        surface.draw_text(QUIZ_PROMPT_X, QUIZ_PROMPT_Y, &question.prompt, QUIZ_TEXT_COLOR);
        for (option_index, option) in question.options.iter().enumerate() {
            let region = option_region_rect(option_index);
            surface.fill_rect(region, QUIZ_OPTION_BG_COLOR);
            surface.draw_text(
                region.x + QUIZ_OPTION_TEXT_INSET_X,
                region.y + QUIZ_OPTION_TEXT_INSET_Y,
                option,
                QUIZ_TEXT_COLOR,
            );
        }
    }
}

fn option_region_rect(option_index: usize) -> RectPx {
    RectPx::new(
        QUIZ_OPTION_X,
        QUIZ_OPTION_TOP_Y + option_index as i32 * QUIZ_OPTION_STRIDE_Y,
        QUIZ_OPTION_WIDTH,
        QUIZ_OPTION_HEIGHT,
    )
}
