mod misc;
