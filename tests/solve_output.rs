use gridmdp::solver::observer::GridPrinter;
use gridmdp::{Action, Cell, GridConfig, GridSolver};

#[test]
fn test_corridor_printed_run() {
    let mut config = GridConfig::new(1, 2);
    config.add_reward(Cell::new(0, 1), 1.0);
    config.set_gamma(1.0);
    config.set_noise(0.0);
    let mut solver = GridSolver::new(&config).unwrap();

    let mut printer = GridPrinter::new(Vec::new());
    let report = solver.run_value_iteration_with(100, &mut printer);
    let output = String::from_utf8(printer.finish().unwrap()).unwrap();

    assert!(report.converged);
    assert_eq!(
        output,
        "Iteration: 1\n| 1.000 | +1 | \n\n\n\
         Iteration: 2\n| 1.000 | +1 | \n\n\n\
         Converged at iteration 2\n"
    );
    assert_eq!(solver.policy().to_string(), "| Right | +1 | \n");
}

#[test]
fn test_classic_printed_run() {
    let mut solver = GridSolver::new(&GridConfig::classic()).unwrap();
    let mut printer = GridPrinter::new(Vec::new());
    solver.run_value_iteration_with(100, &mut printer);
    let output = String::from_utf8(printer.finish().unwrap()).unwrap();

    assert!(output.starts_with(
        "Iteration: 1\n\
         | 0.000 | 0.000 | 0.720 | +1 | \n\
         | 0.000 | WALL | -0.090 | -1 | \n\
         | 0.000 | 0.000 | 0.000 | -0.090 | \n\n\n"
    ));
    assert_eq!(output.matches("Iteration: ").count(), 17);
    assert!(output.ends_with("Converged at iteration 17\n"));
    assert_eq!(
        solver.policy().to_string(),
        "| Right | Right | Right | +1 | \n\
         | Up | WALL | Up | -1 | \n\
         | Up | Right | Up | Left | \n"
    );
}

#[test]
fn test_capped_run_message() {
    let mut solver = GridSolver::new(&GridConfig::classic()).unwrap();
    let mut printer = GridPrinter::new(Vec::new());
    let report = solver.run_value_iteration_with(2, &mut printer);
    let output = String::from_utf8(printer.finish().unwrap()).unwrap();
    assert!(!report.converged);
    assert!(output.ends_with("Stopped after 2 iterations without converging\n"));
}

#[test]
fn test_multiple_walls() {
    let mut config = GridConfig::new(3, 3);
    config.add_reward(Cell::new(0, 2), 1.0);
    config.add_wall(Cell::new(0, 1));
    config.add_wall(Cell::new(1, 1));
    config.set_noise(0.0);
    let mut solver = GridSolver::new(&config).unwrap();
    let report = solver.run_value_iteration(100);
    assert!(report.converged);

    // The only route goes down and around the two walls.
    let policy = solver.policy();
    assert_eq!(policy.get(Cell::new(0, 0)).and_then(|p| p.action()), Some(Action::Down));
    assert_eq!(policy.get(Cell::new(1, 0)).and_then(|p| p.action()), Some(Action::Down));
    assert_eq!(policy.get(Cell::new(2, 0)).and_then(|p| p.action()), Some(Action::Right));
    assert_eq!(policy.get(Cell::new(2, 2)).and_then(|p| p.action()), Some(Action::Up));
    assert_eq!(solver.values()[(0, 1)], 0.0);
    assert_eq!(solver.values()[(1, 1)], 0.0);
}
