use super::*;
use shared::config::FeatureConfig;

fn activation_with(side: usize, active: &[(usize, usize)]) -> Vec<Vec<u8>> {
    let mut rows = vec![vec![0u8; side]; side];
    for &(row, col) in active {
        rows[row][col] = 1;
    }
    rows
}

fn puzzle_config() -> PuzzleConfig {
    PuzzleConfig {
        title: "Guess the Animal!".to_string(),
        answer: "giraffe".to_string(),
        geometry: GridGeometry {
            image_size: 30,
            patch_size: 3,
            stride: 3,
            cell_px: 20,
        },
        reveal_image: None,
        features: vec![
            FeatureConfig {
                label: "eye".to_string(),
                activation: activation_with(10, &[(1, 1)]),
            },
            FeatureConfig {
                label: "ear".to_string(),
                activation: activation_with(10, &[(0, 3)]),
            },
        ],
    }
}

fn game_parts(final_image_available: bool) -> (FeatureModel, GridController) {
    let config = puzzle_config();
    let model = FeatureModel::from_config(&config).expect("model");
    let controller = GridController::new(&config, final_image_available);
    (model, controller)
}

fn click(x_px: f32, y_px: f32) -> InputEvent {
    InputEvent::PointerDown { x_px, y_px }
}

#[test]
fn click_maps_pixels_to_feature_map_cell_and_highlights_patch() {
    let (mut model, mut controller) = game_parts(true);

    // cell_px=20, stride=3: pixel (95, 65) -> full-grid (row 3, col 4)
    // -> feature-map (1, 1), where `eye` activates.
    let instructions = controller.handle(&mut model, click(95.0, 65.0));
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::RedrawCell {
                feature: FeatureId(0),
                cell: Cell::new(1, 1),
                state: RevealState::RevealedTrue,
            },
            RenderInstruction::HighlightPatch {
                x_px: 60,
                y_px: 60,
                width_px: 60,
                height_px: 60,
            },
            RenderInstruction::HighlightFeatureMapCell {
                feature: FeatureId(0),
                cell: Cell::new(1, 1),
            },
        ]
    );
    assert_eq!(controller.cursor(), Some(Cell::new(1, 1)));
}

#[test]
fn out_of_canvas_click_is_silently_ignored() {
    let (mut model, mut controller) = game_parts(true);

    // Canvas is 600x600; each of these lands outside it.
    for (x, y) in [(600.0, 10.0), (10.0, 600.0), (-1.0, 10.0), (10.0, -0.5)] {
        assert!(controller.handle(&mut model, click(x, y)).is_empty());
    }
    assert_eq!(controller.cursor(), None);
    assert_eq!(
        model.revealed_at(FeatureId(0), Cell::new(9, 9)),
        RevealState::Unrevealed
    );
}

#[test]
fn directional_key_before_first_click_is_a_noop() {
    let (mut model, mut controller) = game_parts(true);
    for direction in [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ] {
        assert!(controller
            .handle(&mut model, InputEvent::DirectionalKey(direction))
            .is_empty());
    }
    assert_eq!(controller.cursor(), None);
}

#[test]
fn moves_clamp_at_grid_edges() {
    let (mut model, mut controller) = game_parts(true);

    // Land on the top-left feature-map cell.
    controller.handle(&mut model, click(0.0, 0.0));
    assert_eq!(controller.cursor(), Some(Cell::new(0, 0)));

    // Up and Left press against the edge: nothing moves, nothing redraws.
    assert!(controller
        .handle(&mut model, InputEvent::DirectionalKey(Direction::Up))
        .is_empty());
    assert!(controller
        .handle(&mut model, InputEvent::DirectionalKey(Direction::Left))
        .is_empty());
    assert_eq!(controller.cursor(), Some(Cell::new(0, 0)));

    let instructions = controller.handle(&mut model, InputEvent::DirectionalKey(Direction::Right));
    assert_eq!(controller.cursor(), Some(Cell::new(0, 1)));
    assert!(matches!(
        instructions[0],
        RenderInstruction::RedrawCell {
            cell: Cell { row: 0, col: 1 },
            state: RevealState::RevealedFalse,
            ..
        }
    ));
}

#[test]
fn revisiting_a_cell_reproduces_the_stored_outcome() {
    let (mut model, mut controller) = game_parts(true);

    controller.handle(&mut model, click(65.0, 65.0));
    let first = controller.handle(&mut model, InputEvent::DirectionalKey(Direction::Right));
    let back = controller.handle(&mut model, InputEvent::DirectionalKey(Direction::Left));
    let again = controller.handle(&mut model, InputEvent::DirectionalKey(Direction::Right));

    assert_eq!(first, again);
    assert!(matches!(
        back[0],
        RenderInstruction::RedrawCell {
            cell: Cell { row: 1, col: 1 },
            state: RevealState::RevealedTrue,
            ..
        }
    ));
}

#[test]
fn selecting_a_feature_emits_selector_styling_and_isolates_reveals() {
    let (mut model, mut controller) = game_parts(true);
    let eye = FeatureId(0);
    let ear = FeatureId(1);

    controller.handle(&mut model, InputEvent::SelectFeature(ear));
    let instructions = controller.handle(&mut model, InputEvent::SelectFeature(eye));
    assert_eq!(instructions, vec![RenderInstruction::SetSelectorActive(eye)]);

    controller.handle(&mut model, click(95.0, 65.0));
    assert_eq!(
        model.revealed_at(eye, Cell::new(1, 1)),
        RevealState::RevealedTrue
    );
    assert_eq!(model.revealed_at(ear, Cell::new(1, 1)), RevealState::Unrevealed);
}

#[test]
fn selecting_a_feature_restores_its_saved_cursor() {
    let (mut model, mut controller) = game_parts(true);
    let eye = FeatureId(0);
    let ear = FeatureId(1);

    // Probe (1, 1) with eye, then (0, 3) with ear.
    controller.handle(&mut model, click(95.0, 65.0));
    controller.handle(&mut model, InputEvent::SelectFeature(ear));
    controller.handle(&mut model, click(190.0, 10.0));
    assert_eq!(controller.cursor(), Some(Cell::new(0, 3)));

    let instructions = controller.handle(&mut model, InputEvent::SelectFeature(eye));
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::SetSelectorActive(eye),
            RenderInstruction::HighlightFeatureMapCell {
                feature: eye,
                cell: Cell::new(1, 1),
            },
            RenderInstruction::HighlightPatch {
                x_px: 60,
                y_px: 60,
                width_px: 60,
                height_px: 60,
            },
        ]
    );
    assert_eq!(controller.cursor(), Some(Cell::new(1, 1)));
}

#[test]
fn padded_mixed_case_guess_reveals_the_final_image() {
    let (mut model, mut controller) = game_parts(true);
    let instructions =
        controller.handle(&mut model, InputEvent::SubmitGuess(" Giraffe ".to_string()));
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::ShowFeedback {
                message: "Correct!".to_string(),
                tone: FeedbackTone::Positive,
            },
            RenderInstruction::RevealFinalImage {
                asset_available: true,
            },
        ]
    );
    assert!(controller.image_revealed());
}

#[test]
fn wrong_guess_reports_negative_feedback_and_changes_nothing() {
    let (mut model, mut controller) = game_parts(true);
    let instructions = controller.handle(&mut model, InputEvent::SubmitGuess("zebra".to_string()));
    assert_eq!(
        instructions,
        vec![RenderInstruction::ShowFeedback {
            message: "Incorrect!".to_string(),
            tone: FeedbackTone::Negative,
        }]
    );
    assert!(!controller.image_revealed());
    for feature in model.feature_ids() {
        let snapshot = model.snapshot(feature);
        assert!(snapshot.cells().all(|(_, state)| !state.is_revealed()));
    }
}

#[test]
fn correct_guess_without_asset_degrades_gracefully() {
    let (mut model, mut controller) = game_parts(false);
    let instructions =
        controller.handle(&mut model, InputEvent::SubmitGuess("giraffe".to_string()));
    assert_eq!(
        instructions[1],
        RenderInstruction::RevealFinalImage {
            asset_available: false,
        }
    );

    // Without the image the board stays probe-able.
    assert!(!controller.image_revealed());
    assert!(!controller.handle(&mut model, click(95.0, 65.0)).is_empty());
}

#[test]
fn pointer_probing_stops_once_the_image_is_revealed() {
    let (mut model, mut controller) = game_parts(true);
    controller.handle(&mut model, click(95.0, 65.0));
    controller.handle(&mut model, InputEvent::SubmitGuess("giraffe".to_string()));

    assert!(controller.handle(&mut model, click(10.0, 10.0)).is_empty());

    // Keyboard navigation keeps working over the revealed image.
    let instructions = controller.handle(&mut model, InputEvent::DirectionalKey(Direction::Down));
    assert!(matches!(
        instructions[0],
        RenderInstruction::RedrawCell {
            cell: Cell { row: 2, col: 1 },
            ..
        }
    ));
}
