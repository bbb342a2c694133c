use pipeline_drag::prelude::*;

const DIAGRAM: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g><rect id="rect_0_0" class="draggable" x="0" y="0" width="300" height="100"/>
     <text class="draggable" x="20" y="50">checkout</text></g>
  <g><rect id="rect_400_0" class="draggable" x="400" y="0" width="300" height="100"/>
     <text class="draggable" x="420" y="50">build</text></g>
  <line id="post_rect_0_0_pre_rect_400_0-SegmentA"/>
  <line id="post_rect_0_0_pre_rect_400_0-SegmentB"/>
  <image id="post_rect_0_0_pre_rect_400_0-arrow" width="24" height="24"/>
</svg>"#;

fn main() -> anyhow::Result<()> {
    let _ = pipeline_drag::init_logging(Some("debug"), None);

    let mut controller = pipeline_drag::controller(DIAGRAM, "demo.svg")?;
    println!("=== Initial routing ===");
    for change in controller.take_changes() {
        println!("{:?} {}={}", change.id, change.name, change.value);
    }

    println!("\n=== Drag build below checkout ===");
    controller.pointer_down("rect_400_0", PointerSample::at(450.0, 50.0));
    controller.pointer_move(PointerSample::at(150.0, 300.0));
    for change in controller.take_changes() {
        println!("{:?} {}={}", change.id, change.name, change.value);
    }
    println!("{:?}", controller.pointer_up());

    let out_dir = std::env::temp_dir();
    let mut sink = DirectorySink::new(&out_dir);
    let outcome = controller.generate_save_file(&mut sink)?;
    println!("\n{:?} in {}", outcome, out_dir.display());
    Ok(())
}
