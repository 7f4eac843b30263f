use std::collections::HashSet;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::apple::Apple;
use crate::config::{Palette, Settings};
use crate::entity::{Entity, covers};
use crate::feed::{FeedCell, RenderFeed, entity_cells, erase_cell};
use crate::grid::{GridModel, Position};
use crate::input::{Direction, GameInput};
use crate::snake::{Snake, Step};

/// Whether ticks currently advance the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunMode {
    Running,
    Paused,
}

/// What the host loop should do after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub mode: RunMode,
    pub tick_count: u64,
    /// Number of self-collision restarts so far.
    pub resets: u64,
    grid: GridModel,
    palette: Palette,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, mut rng: StdRng) -> Self {
        let grid = settings.grid;
        let snake = Snake::new(grid.center(), Direction::Right, settings.palette.body);
        let apple = Apple::spawn(
            &mut rng,
            grid,
            &snake.cells().collect(),
            settings.palette.apple,
        );

        Self {
            snake,
            apple,
            mode: RunMode::Running,
            tick_count: 0,
            resets: 0,
            grid,
            palette: settings.palette,
            rng,
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridModel {
        self.grid
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.mode == RunMode::Paused
    }

    /// Advances simulation by one gameplay tick. Does nothing while paused.
    pub fn tick(&mut self) {
        if self.mode != RunMode::Running {
            return;
        }

        self.tick_count += 1;
        self.snake.apply_queued_direction();

        if self.snake.advance(self.grid) == Step::SelfCollision {
            debug!(
                "self-collision at {:?} with length {}, restarting",
                self.snake.head(),
                self.snake.len()
            );
            self.snake.reset(&mut self.rng, self.grid);
            self.resets += 1;
        }

        if covers(&self.apple, self.snake.head()) {
            self.snake.grow();
            self.respawn_apple();
            debug!(
                "apple collected, target length {}, next apple at {:?}",
                self.snake.target_length(),
                self.apple.position()
            );
        }
    }

    fn respawn_apple(&mut self) {
        let mut occupied: HashSet<Position> = self.snake.cells().collect();
        occupied.extend(self.snake.last_vacated());

        if !self.apple.relocate(&mut self.rng, self.grid, &occupied) {
            warn!("no free cell left for the apple, leaving it in place");
        }
    }

    pub fn pause(&mut self) {
        if self.mode == RunMode::Running {
            self.mode = RunMode::Paused;
            info!("paused at tick {}", self.tick_count);
        }
    }

    pub fn resume(&mut self) {
        if self.mode == RunMode::Paused {
            self.mode = RunMode::Running;
            info!("resumed at tick {}", self.tick_count);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.mode {
            RunMode::Running => self.pause(),
            RunMode::Paused => self.resume(),
        }
    }

    /// Applies one external input event.
    ///
    /// Steering is discarded while paused. Quit is reported back regardless
    /// of mode; the host decides how to shut down.
    pub fn apply_input(&mut self, input: GameInput) -> Flow {
        match input {
            GameInput::Direction(direction) => {
                if self.mode == RunMode::Running {
                    self.snake.queue_direction(direction);
                }
            }
            GameInput::PauseToggle => self.toggle_pause(),
            GameInput::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    /// Snapshots the board for a renderer.
    #[must_use]
    pub fn render_feed(&self) -> RenderFeed {
        let apple = FeedCell::new(self.grid, self.apple.position(), self.apple.color());

        RenderFeed {
            tick: self.tick_count,
            paused: self.is_paused(),
            resets: self.resets,
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            cell_size: self.grid.cell_size(),
            snake: entity_cells(self.grid, &self.snake),
            head_index: 0,
            apple,
            vacated: self
                .snake
                .last_vacated()
                .map(|position| erase_cell(self.grid, &self.palette, position)),
            outline: self.palette.outline,
            background: self.palette.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::apple::Apple;
    use crate::config::{PALETTE_CLASSIC, Settings};
    use crate::entity::Entity;
    use crate::grid::{GridModel, Position};
    use crate::input::{Direction, GameInput};
    use crate::snake::Snake;

    use super::{Flow, GameState, RunMode};

    fn state(seed: u64) -> GameState {
        GameState::new_with_seed(&Settings::classic(), seed)
    }

    fn direction_strategy() -> impl Strategy<Value = GameInput> {
        prop_oneof![
            Just(GameInput::Direction(Direction::Up)),
            Just(GameInput::Direction(Direction::Down)),
            Just(GameInput::Direction(Direction::Left)),
            Just(GameInput::Direction(Direction::Right)),
        ]
    }

    /// Steers toward the apple along x first, then y.
    fn chase(grid: GridModel, head: Position, apple: Position) -> Direction {
        let width = i32::from(grid.width());
        let height = i32::from(grid.height());
        let dx = (apple.x - head.x).rem_euclid(width);
        let dy = (apple.y - head.y).rem_euclid(height);

        if dx != 0 && dx <= width / 2 {
            Direction::Right
        } else if dx != 0 {
            Direction::Left
        } else if dy <= height / 2 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Builds a connected, self-avoiding body by walking from `head`.
    fn walk_body(grid: GridModel, head: Position, turns: &[Direction]) -> Vec<Position> {
        let mut body = vec![head];
        let mut current = head;
        for turn in turns {
            let next = grid.step(current, *turn);
            if !body.contains(&next) {
                body.push(next);
                current = next;
            }
        }
        body
    }

    #[test]
    fn new_game_starts_running_at_center_heading_right() {
        let state = state(1);

        assert_eq!(state.mode, RunMode::Running);
        assert_eq!(state.snake.head(), Position::new(16, 12));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_ne!(state.apple.position(), state.snake.head());
    }

    #[test]
    fn snake_grows_after_eating_apple() {
        let mut state = state(1);
        state.apple = Apple::at(Position::new(17, 12), PALETTE_CLASSIC.apple);

        state.tick();
        assert_eq!(state.snake.target_length(), 2);
        assert_eq!(state.snake.len(), 1);

        state.tick();
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn self_collision_restarts_in_place_and_keeps_running() {
        let mut state = state(3);
        state.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Down,
            PALETTE_CLASSIC.body,
        );

        state.tick();

        assert_eq!(state.mode, RunMode::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(16, 12));
        assert_eq!(state.resets, 1);
    }

    #[test]
    fn reset_clears_the_vacated_cell_in_the_feed() {
        let mut state = state(3);
        state.apple = Apple::at(Position::new(0, 0), PALETTE_CLASSIC.apple);
        state.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ],
            Direction::Down,
            PALETTE_CLASSIC.body,
        );

        state.tick();
        let feed = state.render_feed();

        assert_eq!(feed.resets, 1);
        assert_eq!(feed.vacated, None);
        assert_eq!(feed.snake.len(), 1);
    }

    #[test]
    fn pause_toggle_round_trips() {
        let mut state = state(4);

        assert_eq!(state.apply_input(GameInput::PauseToggle), Flow::Continue);
        assert_eq!(state.mode, RunMode::Paused);

        state.apply_input(GameInput::PauseToggle);
        assert_eq!(state.mode, RunMode::Running);
    }

    #[test]
    fn steering_while_paused_is_discarded() {
        let mut state = state(5);
        state.pause();

        state.apply_input(GameInput::Direction(Direction::Up));
        state.resume();
        state.tick();

        assert_eq!(state.snake.head(), Position::new(17, 12));
    }

    #[test]
    fn quit_is_reported_even_while_paused() {
        let mut state = state(6);
        state.pause();

        assert_eq!(state.apply_input(GameInput::Quit), Flow::Quit);
        assert_eq!(state.mode, RunMode::Paused);
    }

    #[test]
    fn render_feed_reports_head_apple_and_vacated_cell() {
        let mut state = state(7);
        state.apple = Apple::at(Position::new(0, 0), PALETTE_CLASSIC.apple);
        state.tick();

        let feed = state.render_feed();

        assert_eq!(feed.grid_width, 32);
        assert_eq!(feed.grid_height, 24);
        assert_eq!(feed.head().map(|cell| cell.position), Some(Position::new(17, 12)));
        assert_eq!(feed.head().map(|cell| cell.origin), Some((340, 240)));
        assert_eq!(feed.apple.position, Position::new(0, 0));
        assert_eq!(feed.apple.color, PALETTE_CLASSIC.apple);
        let vacated = feed.vacated.expect("tail should have moved");
        assert_eq!(vacated.position, Position::new(16, 12));
        assert_eq!(vacated.color, PALETTE_CLASSIC.background);
    }

    proptest! {
        #[test]
        fn snake_stays_inside_the_grid(
            seed in any::<u64>(),
            inputs in prop::collection::vec(direction_strategy(), 1..300),
        ) {
            let mut state = state(seed);
            let grid = state.grid();

            for input in inputs {
                state.apply_input(input);
                state.tick();
                prop_assert!(state.snake.cells().all(|cell| grid.contains(cell)));
                prop_assert!(grid.contains(state.apple.position()));
            }
        }

        #[test]
        fn applied_direction_never_reverses(
            seed in any::<u64>(),
            bursts in prop::collection::vec(prop::collection::vec(direction_strategy(), 0..4), 1..100),
        ) {
            let mut state = state(seed);

            for burst in bursts {
                let before = state.snake.direction();
                let resets_before = state.resets;
                for input in burst {
                    state.apply_input(input);
                }
                state.snake.apply_queued_direction();
                prop_assert_ne!(state.snake.direction(), before.opposite());

                state.tick();
                if state.resets == resets_before {
                    prop_assert_ne!(state.snake.direction(), before.opposite());
                }
            }
        }

        #[test]
        fn eating_grows_by_one_and_moves_apple_off_the_snake(
            seed in any::<u64>(),
            plan in prop::collection::vec(
                (any::<bool>(), prop::sample::select(Direction::ALL.to_vec())),
                1..600,
            ),
        ) {
            let mut state = state(seed);
            let grid = state.grid();

            for (steer_to_apple, wander) in plan {
                let apple_before = state.apple.position();
                let target_before = state.snake.target_length();
                let resets_before = state.resets;

                let turn = if steer_to_apple {
                    chase(grid, state.snake.head(), apple_before)
                } else {
                    wander
                };
                state.apply_input(GameInput::Direction(turn));
                state.tick();

                if state.resets == resets_before && state.snake.head() == apple_before {
                    prop_assert_eq!(state.snake.target_length(), target_before + 1);
                    let apple = state.apple.position();
                    prop_assert!(state.snake.cells().all(|cell| cell != apple));
                } else if state.resets == resets_before {
                    prop_assert_eq!(state.snake.target_length(), target_before);
                }
            }
        }

        #[test]
        fn entering_the_body_restarts_at_center(
            seed in any::<u64>(),
            x in 0i32..32,
            y in 0i32..24,
            turns in prop::collection::vec(prop::sample::select(Direction::ALL.to_vec()), 1..40),
            heading in prop::sample::select(Direction::ALL.to_vec()),
        ) {
            let mut state = state(seed);
            let grid = state.grid();
            let body = walk_body(grid, Position::new(x, y), &turns);
            let next_head = grid.step(body[0], heading);
            let solid = &body[1..body.len().max(2) - 1];
            let expect_collision = solid.contains(&next_head);

            let apple = grid
                .cells()
                .find(|cell| !body.contains(cell) && *cell != next_head && *cell != grid.center())
                .expect("a 32x24 grid has room beside a short body");
            state.apple = Apple::at(apple, PALETTE_CLASSIC.apple);
            state.snake = Snake::from_segments(body.clone(), heading, PALETTE_CLASSIC.body);

            state.tick();

            if expect_collision {
                prop_assert_eq!(state.resets, 1);
                prop_assert_eq!(state.snake.len(), 1);
                prop_assert_eq!(state.snake.target_length(), 1);
                prop_assert_eq!(state.snake.head(), grid.center());
            } else {
                prop_assert_eq!(state.resets, 0);
                prop_assert_eq!(state.snake.head(), next_head);
                prop_assert_eq!(state.snake.len(), body.len());
            }
        }

        #[test]
        fn ticks_while_paused_change_nothing(
            seed in any::<u64>(),
            ticks in 1usize..50,
        ) {
            let mut state = state(seed);
            state.tick();
            state.pause();
            let before = state.render_feed();
            let target = state.snake.target_length();

            for _ in 0..ticks {
                state.tick();
            }

            prop_assert_eq!(state.render_feed(), before);
            prop_assert_eq!(state.snake.target_length(), target);
        }
    }
}
