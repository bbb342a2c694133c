//! Shared diagram fixtures

#![allow(dead_code)]

/// checkout -> build -> test, laid out left to right
pub const CHAIN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <g id="stage_checkout">
    <rect id="rect_0_0" class="draggable" x="0" y="0" width="300" height="100"/>
    <text id="label_checkout" class="draggable" x="20" y="50">checkout</text>
  </g>
  <g id="stage_build">
    <rect id="rect_400_0" class="draggable" x="400" y="0" width="300" height="100"/>
    <text id="label_build" class="draggable" x="420" y="50">build</text>
    <circle id="status_build" class="draggable" cx="690" cy="10" r="5"/>
  </g>
  <g id="stage_test">
    <rect id="rect_800_0" class="draggable" x="800" y="0" width="300" height="100"/>
    <text id="label_test" class="draggable" x="820" y="50">test</text>
  </g>
  <line id="post_rect_0_0_pre_rect_400_0-SegmentA"/>
  <line id="post_rect_0_0_pre_rect_400_0-SegmentB"/>
  <image id="post_rect_0_0_pre_rect_400_0-arrow" xlink:href="arrow.png" width="24" height="24"/>
  <line id="post_rect_400_0_pre_rect_800_0-SegmentA"/>
  <line id="post_rect_400_0_pre_rect_800_0-SegmentB"/>
  <image id="post_rect_400_0_pre_rect_800_0-arrow" xlink:href="arrow.png" width="24" height="24"/>
  <g id="saveButtonGroup"><rect x="0" y="500" width="100" height="30"/></g>
</svg>"#;

pub const A: &str = "rect_0_0";
pub const B: &str = "rect_400_0";
pub const C: &str = "rect_800_0";
pub const A_TO_B: &str = "post_rect_0_0_pre_rect_400_0";
pub const B_TO_C: &str = "post_rect_400_0_pre_rect_800_0";
