pub mod stack_diagram;
